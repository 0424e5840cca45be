// Database seed placeholder. No storage is wired up yet; with a
// DATABASE_URL present this still only logs what it would do.

fn main() {
    let database_url = std::env::var("DATABASE_URL").unwrap_or_default();

    if database_url.is_empty() {
        println!("No DATABASE_URL found, skipping database seed");
        return;
    }

    println!("Seeding database...");
    // seed data goes here once a database is connected
    println!("Database seeded successfully");
}
