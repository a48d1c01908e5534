//! Runs the Postgres store against a real database.
//!
//! `#[sqlx::test]` creates a fresh database per test from `DATABASE_URL` and
//! applies `./migrations`. Run with:
//! `DATABASE_URL=postgres://... cargo test --test postgres_repository_test -- --ignored`

use assert_matches::assert_matches;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sqlx::PgPool;

use trainer_service::models::{
    ActiveDays, NewReport, NewSportActivity, NewTrainingProgram, RequestStatus,
    TrainerProfileUpdate, Weekday,
};
use trainer_service::repository::{PgTrainerRepository, RepositoryError, TrainerRepository};

async fn insert_user(pool: &PgPool, first_name: &str, last_name: &str, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (first_name, last_name, email) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn insert_trainer(pool: &PgPool, user_id: i64) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO trainers (user_id, user_name, sports, monday, friday)
        VALUES ($1, 'coach', ARRAY['running', 'rowing'], TRUE, TRUE)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn insert_trainee(pool: &PgPool, trainer_id: i64, user_id: i64) -> i64 {
    let trainee_id: i64 =
        sqlx::query_scalar("INSERT INTO trainees (user_id) VALUES ($1) RETURNING id")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .unwrap();

    sqlx::query("INSERT INTO trainer_trainees (trainer_id, trainee_id) VALUES ($1, $2)")
        .bind(trainer_id)
        .bind(trainee_id)
        .execute(pool)
        .await
        .unwrap();

    trainee_id
}

async fn insert_request(pool: &PgPool, trainer_id: i64, trainee_id: i64, status: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO program_requests (trainer_id, trainee_id, description, status)
        VALUES ($1, $2, 'Marathon block', $3)
        RETURNING id
        "#,
    )
    .bind(trainer_id)
    .bind(trainee_id)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// One trainer with two linked trainees, returned as (trainer, trainee, trainee)
async fn seed(pool: &PgPool) -> (i64, i64, i64) {
    let coach = insert_user(pool, "Maya", "Okafor", "maya@example.com").await;
    let trainer_id = insert_trainer(pool, coach).await;

    let leo = insert_user(pool, "Leo", "Brandt", "leo@example.com").await;
    let sofia = insert_user(pool, "Sofia", "Reyes", "sofia@example.com").await;
    let second = insert_trainee(pool, trainer_id, sofia).await;
    let first = insert_trainee(pool, trainer_id, leo).await;

    (trainer_id, first, second)
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn test_trainer_lookup_reads_joined_rows(pool: PgPool) {
    let (trainer_id, first, second) = seed(&pool).await;
    let repo = PgTrainerRepository::new(pool.clone());

    let trainer = repo.find_trainer_by_user_id(1).await.unwrap().unwrap();

    assert_eq!(trainer.id, trainer_id);
    assert_eq!(trainer.user.full_name(), "Maya Okafor");
    assert_eq!(trainer.sports, vec!["running", "rowing"]);
    assert_eq!(trainer.trainee_ids, vec![second.min(first), second.max(first)]);
    assert!(trainer.active_days.monday && trainer.active_days.friday);
    assert!(!trainer.active_days.tuesday);

    assert!(repo.find_trainer_by_user_id(999).await.unwrap().is_none());
    assert_eq!(repo.list_trainers().await.unwrap().len(), 1);

    let trainee = repo.find_trainee(second).await.unwrap().unwrap();
    assert_eq!(trainee.user.full_name(), "Sofia Reyes");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn test_profile_update_is_partial(pool: PgPool) {
    let (trainer_id, _, _) = seed(&pool).await;
    let repo = PgTrainerRepository::new(pool.clone());

    let updated = repo
        .update_trainer_profile(
            trainer_id,
            TrainerProfileUpdate {
                last_name: Some("Okafor-Hale".to_string()),
                coach_experience: Some(9),
                active_days: Some(ActiveDays {
                    sunday: true,
                    ..ActiveDays::default()
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.user.first_name, "Maya");
    assert_eq!(updated.user.last_name, "Okafor-Hale");
    assert_eq!(updated.user_name, "coach");
    assert_eq!(updated.coach_experience, 9);
    assert_eq!(
        updated.active_days,
        ActiveDays {
            sunday: true,
            ..ActiveDays::default()
        }
    );

    let missing = repo
        .update_trainer_profile(9999, TrainerProfileUpdate::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn test_duplicate_email_is_a_conflict(pool: PgPool) {
    let (trainer_id, _, _) = seed(&pool).await;
    let repo = PgTrainerRepository::new(pool.clone());

    let result = repo
        .update_trainer_profile(
            trainer_id,
            TrainerProfileUpdate {
                email: Some("leo@example.com".to_string()),
                first_name: Some("Changed".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(result, Err(RepositoryError::Conflict(_)));

    // The failed update is rolled back as a whole.
    let trainer = repo.find_trainer_by_user_id(1).await.unwrap().unwrap();
    assert_eq!(trainer.user.first_name, "Maya");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn test_requests_round_trip_status(pool: PgPool) {
    let (trainer_id, first, _) = seed(&pool).await;
    let repo = PgTrainerRepository::new(pool.clone());
    let pending = insert_request(&pool, trainer_id, first, "pending").await;
    let accepted = insert_request(&pool, trainer_id, first, "accepted").await;

    let requests = repo.list_requests_for_trainer(trainer_id).await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].id, accepted);
    assert_eq!(requests[0].status, RequestStatus::Accepted);
    assert_eq!(requests[1].trainee_name, "Leo Brandt");

    let priced = repo
        .set_request_price(pending, trainer_id, 250, Some("12 weeks".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(priced.status, RequestStatus::Priced);
    assert_eq!(priced.price, Some(250));
    assert_eq!(priced.description, "12 weeks");

    let repriced = repo
        .set_request_price(pending, trainer_id, 200, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(repriced.price, Some(200));
    assert_eq!(repriced.description, "12 weeks");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn test_set_price_skips_answered_and_foreign_requests(pool: PgPool) {
    let (trainer_id, first, _) = seed(&pool).await;
    let repo = PgTrainerRepository::new(pool.clone());
    let accepted = insert_request(&pool, trainer_id, first, "accepted").await;
    let pending = insert_request(&pool, trainer_id, first, "pending").await;

    assert!(repo
        .set_request_price(accepted, trainer_id, 999, None)
        .await
        .unwrap()
        .is_none());
    assert!(repo
        .set_request_price(pending, trainer_id + 1, 999, None)
        .await
        .unwrap()
        .is_none());

    let stored = repo.find_request(accepted).await.unwrap().unwrap();
    assert_eq!(stored.status, RequestStatus::Accepted);
    assert_eq!(stored.price, None);
    let stored = repo.find_request(pending).await.unwrap().unwrap();
    assert_eq!(stored.status, RequestStatus::Pending);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn test_unknown_request_status_is_corrupt(pool: PgPool) {
    let (trainer_id, first, _) = seed(&pool).await;
    let repo = PgTrainerRepository::new(pool.clone());
    let request_id = insert_request(&pool, trainer_id, first, "archived").await;

    assert_matches!(
        repo.find_request(request_id).await,
        Err(RepositoryError::CorruptRecord(_))
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs DATABASE_URL pointing at a Postgres server"]
async fn test_program_activity_and_report_inserts(pool: PgPool) {
    let (trainer_id, first, _) = seed(&pool).await;
    let repo = PgTrainerRepository::new(pool.clone());

    let program = repo
        .insert_program(NewTrainingProgram {
            trainer_id,
            trainee_id: first,
            title: "Spring base".to_string(),
            description: None,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 4, 28).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(repo.find_program(program.id).await.unwrap(), Some(program.clone()));

    let activity = repo
        .insert_sport_activity(NewSportActivity {
            program_id: program.id,
            name: "Tempo run".to_string(),
            day: Weekday::Thursday,
            sets: 1,
            repetitions: 1,
            duration_minutes: 50,
        })
        .await
        .unwrap();
    assert_eq!(activity.program_id, program.id);
    assert_eq!(activity.day, Weekday::Thursday);

    let report = repo
        .insert_report(NewReport {
            user_id: 77,
            description: "Spam profile".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(report.user_id, 77);
    assert_eq!(report.description, "Spam profile");
}
