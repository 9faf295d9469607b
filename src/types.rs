use std::collections::BTreeMap;
use std::fmt;

/// Page size used when a caller asks for a non-positive limit.
pub const DEFAULT_LIMIT: i64 = 20;

error_chain! {
    foreign_links {
        Diesel(::diesel::result::Error);
        Connection(::diesel::ConnectionError);
        Pool(::r2d2::Error);
        Var(::std::env::VarError);
        ParseInt(::std::num::ParseIntError);
    }

    errors {
        ArticleNotFound {
            description("article not found")
            display("article not found")
        }

        UserNotFound {
            description("user not found")
            display("user not found")
        }

        CommentNotFound {
            description("comment not found")
            display("comment not found")
        }

        FavoriteEntryNotFound {
            description("favorite entry not found")
            display("favorite entry not found")
        }

        Validation(errors: ValidationError) {
            description("invalid input")
            display("invalid input: {}", errors)
        }
    }
}

/// Field name to messages, in the shape RealWorld clients expect under `errors`.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct ValidationError(BTreeMap<String, Vec<String>>);

impl ValidationError {
    pub fn add_error<K: Into<String>, V: Into<String>>(&mut self, key: K, val: V) {
        let entry = self.0.entry(key.into()).or_insert_with(Vec::new);
        entry.push(val.into());
    }

    pub fn with<K: Into<String>, V: Into<String>>(key: K, val: V) -> Self {
        let mut error = ValidationError::default();
        error.add_error(key, val);
        error
    }

    /// Adds `message` under `field` when `value` is blank.
    pub fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add_error(field, message);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(|m| m.as_slice()).unwrap_or(&[])
    }

    pub fn merge(&mut self, other: ValidationError) {
        for (key, errors) in other.0.into_iter() {
            let entry = self.0.entry(key).or_insert_with(Vec::new);
            entry.extend(errors);
        }
    }

    /// `Ok(())` when nothing was collected, a `Validation` error otherwise.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ErrorKind::Validation(self).into())
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{} {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Offset/limit window over a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: i64,
}

impl Window {
    /// Non-positive limits fall back to [`DEFAULT_LIMIT`]; large limits pass through.
    /// Negative offsets start from the first row.
    pub fn new(offset: i64, limit: i64) -> Window {
        Window {
            offset: if offset > 0 { offset } else { 0 },
            limit: if limit > 0 { limit } else { DEFAULT_LIMIT },
        }
    }
}

impl Default for Window {
    fn default() -> Window {
        Window::new(0, DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults_non_positive_limit() {
        assert_eq!(Window::new(0, 0).limit, DEFAULT_LIMIT);
        assert_eq!(Window::new(0, -3).limit, DEFAULT_LIMIT);
        assert_eq!(Window::new(5, 7), Window { offset: 5, limit: 7 });
    }

    #[test]
    fn window_passes_large_limit_through() {
        assert_eq!(Window::new(0, 10_000).limit, 10_000);
    }

    #[test]
    fn window_clamps_negative_offset() {
        assert_eq!(Window::new(-4, 5).offset, 0);
    }

    #[test]
    fn validation_error_collects_blank_fields() {
        let mut errors = ValidationError::default();
        errors.require("title", "  ", "can't be blank");
        errors.require("body", "text", "can't be blank");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.messages("title"), &["can't be blank".to_string()][..]);
        assert!(errors.messages("body").is_empty());
    }

    #[test]
    fn validation_error_merges_and_displays() {
        let mut errors = ValidationError::with("title", "can't be blank");
        errors.merge(ValidationError::with("title", "is too long"));
        assert_eq!(errors.messages("title").len(), 2);
        assert_eq!(
            errors.to_string(),
            "title can't be blank; title is too long"
        );
    }

    #[test]
    fn empty_validation_error_is_ok() {
        assert!(ValidationError::default().into_result().is_ok());
        let err = ValidationError::with("body", "can't be blank")
            .into_result()
            .unwrap_err();
        match *err.kind() {
            ErrorKind::Validation(ref errors) => assert_eq!(errors.len(), 1),
            ref other => panic!("unexpected {:?}", other),
        }
    }
}
