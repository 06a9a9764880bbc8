pub mod schema;
pub mod horoscope;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

pub fn build_pool(database_url: &str) -> Result<PgPool, r2d2::Error> {
    Pool::builder().build(ConnectionManager::<PgConnection>::new(database_url))
}
