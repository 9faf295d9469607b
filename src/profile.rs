use repository::UnitOfWork;
use types::*;
use users::FollowKey;

/// A user's public face, relative to whoever is looking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub following: bool,
}

/// Builds author profiles for hydrated views.
///
/// Resolution happens inside the caller's unit of work so a hydrated view
/// is read from one snapshot.
pub trait ProfileResolver {
    fn get_profile(
        &self,
        uow: &dyn UnitOfWork,
        username: &str,
        viewer_id: Option<i32>,
    ) -> Result<Profile>;
}

/// Resolves `following` from the follows relation; anonymous viewers follow nobody.
#[derive(Debug, Clone, Copy, Default)]
pub struct FollowProfileResolver;

impl ProfileResolver for FollowProfileResolver {
    fn get_profile(
        &self,
        uow: &dyn UnitOfWork,
        username: &str,
        viewer_id: Option<i32>,
    ) -> Result<Profile> {
        let user = uow
            .users()
            .find_by_username(username)?
            .ok_or_else(|| Error::from(ErrorKind::UserNotFound))?;
        let following = match viewer_id {
            Some(viewer_id) => uow
                .follows()
                .is_following(FollowKey::new(user.id, viewer_id))?,
            None => false,
        };
        Ok(user.profile(following))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::Database;
    use repository::DataSource;
    use users::NewUser;

    #[test]
    fn anonymous_viewer_never_follows() {
        let db = Database::in_memory().unwrap();
        let profile = db
            .unit_of_work(|uow| {
                let jake = uow.users().create(&NewUser::new("jake", "jake@jake.jake"))?;
                let anna = uow.users().create(&NewUser::new("anna", "anna@mail.com"))?;
                uow.follows().follow(FollowKey::new(jake.id, anna.id))?;
                FollowProfileResolver.get_profile(uow, "jake", None)
            })
            .unwrap();
        assert_eq!(profile.username, "jake");
        assert!(!profile.following);
    }

    #[test]
    fn following_is_relative_to_viewer() {
        let db = Database::in_memory().unwrap();
        let (by_anna, by_bob) = db
            .unit_of_work(|uow| {
                let jake = uow.users().create(&NewUser::new("jake", "jake@jake.jake"))?;
                let anna = uow.users().create(&NewUser::new("anna", "anna@mail.com"))?;
                let bob = uow.users().create(&NewUser::new("bob", "bob@mail.com"))?;
                uow.follows().follow(FollowKey::new(jake.id, anna.id))?;
                let by_anna = FollowProfileResolver.get_profile(uow, "jake", Some(anna.id))?;
                let by_bob = FollowProfileResolver.get_profile(uow, "jake", Some(bob.id))?;
                Ok((by_anna, by_bob))
            })
            .unwrap();
        assert!(by_anna.following);
        assert!(!by_bob.following);
    }

    #[test]
    fn unknown_username_is_user_not_found() {
        let db = Database::in_memory().unwrap();
        let err = db
            .unit_of_work(|uow| FollowProfileResolver.get_profile(uow, "ghost", None))
            .unwrap_err();
        match *err.kind() {
            ErrorKind::UserNotFound => {}
            ref other => panic!("unexpected {:?}", other),
        }
    }
}
