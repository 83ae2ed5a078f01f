use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager, PoolError, PooledConnection};
use diesel_migrations::RunMigrationsError;

embed_migrations!();

pub(crate) type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub(crate) type DbConn = PooledConnection<ConnectionManager<PgConnection>>;

pub(crate) fn build_pool(database_url: &str, max_size: u32) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    r2d2::Pool::builder().max_size(max_size).build(manager)
}

/// Applies every migration under `migrations/` that has not run yet.
pub(crate) fn run_migrations(conn: &PgConnection) -> Result<(), RunMigrationsError> {
    embedded_migrations::run(conn)
}
