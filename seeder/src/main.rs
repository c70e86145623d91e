use crate::seed::{Seeder, run_seeder};
use crate::seeds::{course::CourseSeeder, enrollment::EnrollmentSeeder, student::StudentSeeder};
use colored::*;
use migration::{Migrator, MigratorTrait};
use util::config;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let path = config::database_path();
    let db = match db::connect(&path).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {e}", "Failed to open database:".red());
            std::process::exit(1);
        }
    };
    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("{} {e}", "Failed to run migrations:".red());
        std::process::exit(1);
    }

    for (seeder, name) in [
        (Box::new(CourseSeeder) as Box<dyn Seeder + Send + Sync>, "Course"),
        (Box::new(StudentSeeder), "Student"),
        (Box::new(EnrollmentSeeder), "Enrollment"),
    ] {
        if let Err(e) = run_seeder(&*seeder, name, &db).await {
            eprintln!("{} {e}", format!("{name} seeder failed:").red());
            std::process::exit(1);
        }
    }
}
