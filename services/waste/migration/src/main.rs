use sea_orm_migration::prelude::*;

use pilah_waste_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
