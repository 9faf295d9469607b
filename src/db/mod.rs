use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use dotenv::dotenv;
use r2d2;
use r2d2_diesel::{self, ConnectionManager};
use repository::*;
use std::env;
use types::Result;

mod articles;
mod comments;
pub mod schema;
mod users;

// An alias to the type for a pool of Diesel SQLite connections.
pub type Pool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const CREATE_TABLES: &str = include_str!("../../migrations/2018-06-01-000000_create_tables/up.sql");
const DEFAULT_POOL_SIZE: u32 = 10;
const IN_MEMORY: &str = ":memory:";

no_arg_sql_function!(
    last_insert_rowid,
    ::diesel::sql_types::Integer,
    "Rowid of the most recent successful INSERT on this connection."
);

fn last_insert_id(connection: &SqliteConnection) -> QueryResult<i32> {
    ::diesel::select(last_insert_rowid).get_result(connection)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub pool_size: u32,
}

impl Config {
    /// Reads `DATABASE_URL` and the optional `DATABASE_POOL_SIZE`, after
    /// loading `.env` when one is present.
    pub fn from_env() -> Result<Config> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL")?;
        let pool_size = match env::var("DATABASE_POOL_SIZE") {
            Ok(size) => size.parse()?,
            Err(env::VarError::NotPresent) => DEFAULT_POOL_SIZE,
            Err(e) => return Err(e.into()),
        };
        Ok(Config {
            database_url,
            pool_size,
        })
    }
}

/// Turns on foreign keys for every pooled connection and waits on locks
/// instead of failing immediately.
#[derive(Debug)]
struct SqlitePragmas;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2_diesel::Error> for SqlitePragmas {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> ::std::result::Result<(), r2d2_diesel::Error> {
        connection
            .batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(r2d2_diesel::Error::QueryError)
    }
}

/// Pooled SQLite store; every unit of work is one transaction on one connection.
pub struct Database {
    pool: Pool,
}

impl Database {
    /// Pool over `config.database_url`. Every pooled connection to a file
    /// sees the same data; `:memory:` would give each connection its own
    /// empty database, so it is served by [`in_memory`](#method.in_memory)
    /// regardless of the pool size.
    pub fn connect(config: &Config) -> Result<Database> {
        if config.database_url == IN_MEMORY {
            if config.pool_size > 1 {
                warn!("{} ignores pool size {}; using one connection", IN_MEMORY, config.pool_size);
            }
            return Database::in_memory();
        }
        let manager = ConnectionManager::<SqliteConnection>::new(config.database_url.as_str());
        let pool = r2d2::Pool::builder()
            .max_size(config.pool_size)
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)?;
        Database::open(pool)
    }

    /// A private in-memory database. It lives on a single connection that
    /// the pool never recycles, so its contents last as long as the value.
    pub fn in_memory() -> Result<Database> {
        let manager = ConnectionManager::<SqliteConnection>::new(IN_MEMORY);
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)?;
        Database::open(pool)
    }

    fn open(pool: Pool) -> Result<Database> {
        {
            let connection = pool.get()?;
            connection.batch_execute(CREATE_TABLES)?;
        }
        info!("database ready ({} connections)", pool.max_size());
        Ok(Database { pool })
    }
}

impl DataSource for Database {
    fn unit_of_work<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn UnitOfWork) -> Result<T>,
    {
        let connection = self.pool.get()?;
        let connection: &SqliteConnection = &*connection;
        connection.transaction(|| work(&DbUnitOfWork { connection }))
    }
}

/// All repositories over one borrowed connection.
pub struct DbUnitOfWork<'a> {
    connection: &'a SqliteConnection,
}

impl<'a> UnitOfWork for DbUnitOfWork<'a> {
    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn follows(&self) -> &dyn FollowRepository {
        self
    }

    fn articles(&self) -> &dyn ArticleRepository {
        self
    }

    fn tags(&self) -> &dyn TagRepository {
        self
    }

    fn article_tags(&self) -> &dyn ArticleTagRepository {
        self
    }

    fn favorites(&self) -> &dyn FavoriteRepository {
        self
    }

    fn comments(&self) -> &dyn CommentRepository {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ErrorKind;
    use users::NewUser;

    #[test]
    fn unit_of_work_commits_on_ok() {
        let db = Database::in_memory().unwrap();

        let user = db
            .unit_of_work(|uow| uow.users().create(&NewUser::new("jake", "jake@mail.com")))
            .unwrap();

        let found = db.unit_of_work(|uow| uow.users().find_by_id(user.id)).unwrap();
        assert_eq!(found.map(|u| u.username), Some("jake".to_string()));
    }

    #[test]
    fn unit_of_work_rolls_back_on_err() {
        let db = Database::in_memory().unwrap();

        let result: Result<()> = db.unit_of_work(|uow| {
            uow.users().create(&NewUser::new("jake", "jake@mail.com"))?;
            bail!(ErrorKind::ArticleNotFound)
        });

        assert!(result.is_err());
        let found = db
            .unit_of_work(|uow| uow.users().find_by_username("jake"))
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn connect_to_memory_shares_one_database_across_units_of_work() {
        let db = Database::connect(&Config {
            database_url: ":memory:".to_string(),
            pool_size: 4,
        })
        .unwrap();

        db.unit_of_work(|uow| uow.users().create(&NewUser::new("jake", "jake@mail.com")))
            .unwrap();
        for _ in 0..4 {
            let found = db
                .unit_of_work(|uow| uow.users().find_by_username("jake"))
                .unwrap();
            assert!(found.is_some());
        }
    }

    #[test]
    fn in_memory_databases_are_private() {
        let first = Database::in_memory().unwrap();
        let second = Database::in_memory().unwrap();

        first
            .unit_of_work(|uow| uow.users().create(&NewUser::new("jake", "jake@mail.com")))
            .unwrap();

        let found = second
            .unit_of_work(|uow| uow.users().find_by_username("jake"))
            .unwrap();
        assert!(found.is_none());
    }
}
