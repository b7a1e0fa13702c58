//! Pool construction from the configured database URL.

#![expect(
    clippy::panic_in_result_fn,
    reason = "Tests assert on outcomes while propagating setup errors with `?`"
)]

use super::helpers::{BoxError, test_database, with_search_path};
use diesel::prelude::*;
use diesel::sql_types::Text;
use rstest::rstest;

#[rstest]
#[case("postgres://localhost/gigboard", "postgres://localhost/gigboard?options=-csearch_path%3Dtest_a")]
#[case(
    "postgresql://localhost/gigboard?sslmode=disable",
    "postgresql://localhost/gigboard?sslmode=disable&options=-csearch_path%3Dtest_a"
)]
#[case("host=localhost dbname=gigboard", "host=localhost dbname=gigboard options='-csearch_path=test_a'")]
fn search_path_is_added_to_the_url(#[case] url: &str, #[case] expected: &str) {
    assert_eq!(with_search_path(url, "test_a"), expected);
}

#[tokio::test(flavor = "multi_thread")]
async fn pooled_connections_use_the_private_schema() -> Result<(), BoxError> {
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let pool = database.pool();
    let expected = database.schema().to_owned();

    let schemas = tokio::task::spawn_blocking(move || -> Result<Vec<String>, BoxError> {
        let mut first = pool.get()?;
        let mut second = pool.get()?;
        let current_schema = || diesel::select(diesel::dsl::sql::<Text>("current_schema()"));
        Ok(vec![
            current_schema().get_result::<String>(&mut first)?,
            current_schema().get_result::<String>(&mut second)?,
        ])
    })
    .await??;

    assert_eq!(schemas, vec![expected.clone(), expected]);
    Ok(())
}
