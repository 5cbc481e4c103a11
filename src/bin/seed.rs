//! Populates the weekday/weekend routine roster. Existing routine
//! items are cleared first to prevent duplicates on re-runs.

use routinely_api::config::Config;
use routinely_api::db::{self, Store};
use routinely_api::models::routine::{CreateRoutineRequest, RoutineKind};

const WEEKDAY_ROUTINE: &[(&str, &str, &str, &str)] = &[
    ("06:30 AM", "Wake up and hydrate", "A full glass of water before anything else.", "Health"),
    ("06:45 AM", "Morning stretch", "Ten minutes of mobility work.", "Health"),
    ("07:00 AM", "Cook breakfast", "Protein first; no screens at the table.", "Health"),
    ("07:30 AM", "Plan the day", "Three priorities, written down.", "Work"),
    ("08:00 AM", "Deep work block", "Hardest task first, notifications off.", "Work"),
    ("10:30 AM", "Short walk", "Fresh air between focus blocks.", "Health"),
    ("12:30 PM", "Lunch", "Away from the desk.", "Health"),
    ("01:30 PM", "Meetings and email", "Batched into the afternoon.", "Work"),
    ("05:00 PM", "Gym session", "Weights on alternating days.", "Health"),
    ("06:30 PM", "Dinner", "Cook rather than order.", "Health"),
    ("07:30 PM", "Reading", "At least twenty pages.", "Mind"),
    ("09:30 PM", "Journal", "A few lines on the day.", "Mind"),
    ("10:30 PM", "Wind down", "Screens off, lights low.", "Health"),
    ("11:00 PM", "Lights out", "Consistent sleep window.", "Health"),
];

const WEEKEND_ROUTINE: &[(&str, &str, &str, &str)] = &[
    ("08:00 AM", "Wake up and hydrate", "Slower start, same first step.", "Health"),
    ("08:30 AM", "Long breakfast", "No rush.", "Health"),
    ("09:30 AM", "Study block", "One focused session on the current course.", "Mind"),
    ("11:00 AM", "Long workout", "Extended session or a run outside.", "Health"),
    ("12:30 PM", "Lunch", "Batch cook for the week when possible.", "Health"),
    ("02:00 PM", "Errands and groceries", "Clear the list for the week.", "Home"),
    ("04:00 PM", "Personal project", "Two unhurried hours.", "Mind"),
    ("06:30 PM", "Evening walk", "Reflect on the week.", "Health"),
    ("09:30 PM", "Journal", "Longer weekend reflection.", "Mind"),
    ("11:00 PM", "Lights out", "Keep the rhythm for Monday.", "Health"),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routinely_api=info".into()),
        )
        .init();

    let config = Config::from_env();
    let pool = db::create_pool(&config.database_url).await;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let store = Store::new(pool);

    let existing = store
        .routine_count()
        .await
        .expect("Failed to count routine items");
    if existing > 0 {
        tracing::info!(existing, "Clearing existing routine items to prevent duplicates");
        store
            .clear_routines()
            .await
            .expect("Failed to clear routine items");
    }

    let mut seeded = 0;
    for (kind, roster) in [
        (RoutineKind::Weekday, WEEKDAY_ROUTINE),
        (RoutineKind::Weekend, WEEKEND_ROUTINE),
    ] {
        for (time_start, name, description, category) in roster {
            store
                .create_routine(CreateRoutineRequest {
                    name: (*name).into(),
                    time_start: (*time_start).into(),
                    routine_type: kind,
                    time_end: None,
                    category: Some((*category).into()),
                    description: Some((*description).into()),
                })
                .await
                .expect("Failed to seed routine item");
            seeded += 1;
        }
    }

    tracing::info!(seeded, "Database seeded successfully");
}
