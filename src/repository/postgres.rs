use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{RepositoryError, TrainerRepository};
use crate::models::{
    ActiveDays, NewReport, NewSportActivity, NewTrainingProgram, ProgramRequest, Report,
    RequestStatus, SportActivity, Trainee, Trainer, TrainerProfileUpdate, TrainingProgram,
    User, Weekday,
};

const TRAINER_SELECT: &str = r#"
    SELECT
        t.id, t.user_id, u.first_name, u.last_name, u.email,
        t.user_name, t.status, t.coach_experience, t.contact, t.language, t.country,
        t.sports, t.achievements, t.education,
        ARRAY(
            SELECT tt.trainee_id FROM trainer_trainees tt
            WHERE tt.trainer_id = t.id
            ORDER BY tt.trainee_id
        ) AS trainee_ids,
        t.monday, t.tuesday, t.wednesday, t.thursday, t.friday, t.saturday, t.sunday
    FROM trainers t
    JOIN users u ON u.id = t.user_id
"#;

const REQUEST_SELECT: &str = r#"
    SELECT
        r.id, r.trainer_id, r.trainee_id,
        u.first_name || ' ' || u.last_name AS trainee_name,
        r.price, r.description, r.status, r.created_at
    FROM program_requests r
    JOIN trainees te ON te.id = r.trainee_id
    JOIN users u ON u.id = te.user_id
"#;

#[derive(Debug, FromRow)]
struct TrainerRow {
    id: i64,
    user_id: i64,
    first_name: String,
    last_name: String,
    email: String,
    user_name: String,
    status: String,
    coach_experience: i32,
    contact: String,
    language: String,
    country: String,
    sports: Vec<String>,
    achievements: String,
    education: String,
    trainee_ids: Vec<i64>,
    monday: bool,
    tuesday: bool,
    wednesday: bool,
    thursday: bool,
    friday: bool,
    saturday: bool,
    sunday: bool,
}

impl From<TrainerRow> for Trainer {
    fn from(row: TrainerRow) -> Self {
        Trainer {
            id: row.id,
            user_id: row.user_id,
            user: User {
                id: row.user_id,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
            },
            user_name: row.user_name,
            status: row.status,
            coach_experience: row.coach_experience,
            contact: row.contact,
            language: row.language,
            country: row.country,
            sports: row.sports,
            achievements: row.achievements,
            education: row.education,
            trainee_ids: row.trainee_ids,
            active_days: ActiveDays {
                monday: row.monday,
                tuesday: row.tuesday,
                wednesday: row.wednesday,
                thursday: row.thursday,
                friday: row.friday,
                saturday: row.saturday,
                sunday: row.sunday,
            },
        }
    }
}

#[derive(Debug, FromRow)]
struct TraineeRow {
    id: i64,
    user_id: i64,
    first_name: String,
    last_name: String,
    email: String,
}

#[derive(Debug, FromRow)]
struct RequestRow {
    id: i64,
    trainer_id: i64,
    trainee_id: i64,
    trainee_name: String,
    price: Option<i64>,
    description: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<RequestRow> for ProgramRequest {
    type Error = RepositoryError;

    fn try_from(row: RequestRow) -> Result<Self, Self::Error> {
        let status = RequestStatus::from_str(&row.status).ok_or_else(|| {
            RepositoryError::CorruptRecord(format!(
                "program request {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;

        Ok(ProgramRequest {
            id: row.id,
            trainer_id: row.trainer_id,
            trainee_id: row.trainee_id,
            trainee_name: row.trainee_name,
            price: row.price,
            description: row.description,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ProgramRow {
    id: i64,
    trainer_id: i64,
    trainee_id: i64,
    title: String,
    description: Option<String>,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
    created_at: DateTime<Utc>,
}

impl From<ProgramRow> for TrainingProgram {
    fn from(row: ProgramRow) -> Self {
        TrainingProgram {
            id: row.id,
            trainer_id: row.trainer_id,
            trainee_id: row.trainee_id,
            title: row.title,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ActivityRow {
    id: i64,
    program_id: i64,
    name: String,
    day: String,
    sets: i32,
    repetitions: i32,
    duration_minutes: i32,
}

#[derive(Debug, FromRow)]
struct ReportRow {
    id: i64,
    user_id: i64,
    description: String,
    created_at: DateTime<Utc>,
}

/// Maps unique-constraint violations to `Conflict`, everything else to `Database`
fn map_db_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(db_err.message().to_string());
        }
    }
    RepositoryError::Database(err)
}

/// Postgres implementation of `TrainerRepository`
#[derive(Debug, Clone)]
pub struct PgTrainerRepository {
    pool: PgPool,
}

impl PgTrainerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_trainer_by_id(&self, trainer_id: i64) -> Result<Option<Trainer>, RepositoryError> {
        let row = sqlx::query_as::<_, TrainerRow>(&format!("{TRAINER_SELECT} WHERE t.id = $1"))
            .bind(trainer_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Trainer::from))
    }
}

#[async_trait]
impl TrainerRepository for PgTrainerRepository {
    async fn find_trainer_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<Trainer>, RepositoryError> {
        let row =
            sqlx::query_as::<_, TrainerRow>(&format!("{TRAINER_SELECT} WHERE t.user_id = $1"))
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Trainer::from))
    }

    async fn list_trainers(&self) -> Result<Vec<Trainer>, RepositoryError> {
        let rows = sqlx::query_as::<_, TrainerRow>(&format!("{TRAINER_SELECT} ORDER BY t.id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Trainer::from).collect())
    }

    async fn update_trainer_profile(
        &self,
        trainer_id: i64,
        update: TrainerProfileUpdate,
    ) -> Result<Option<Trainer>, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let days = update.active_days;

        let user_id: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE trainers
            SET
                user_name = COALESCE($2, user_name),
                status = COALESCE($3, status),
                coach_experience = COALESCE($4, coach_experience),
                contact = COALESCE($5, contact),
                language = COALESCE($6, language),
                country = COALESCE($7, country),
                sports = COALESCE($8, sports),
                achievements = COALESCE($9, achievements),
                education = COALESCE($10, education),
                monday = COALESCE($11, monday),
                tuesday = COALESCE($12, tuesday),
                wednesday = COALESCE($13, wednesday),
                thursday = COALESCE($14, thursday),
                friday = COALESCE($15, friday),
                saturday = COALESCE($16, saturday),
                sunday = COALESCE($17, sunday)
            WHERE id = $1
            RETURNING user_id
            "#,
        )
        .bind(trainer_id)
        .bind(update.user_name)
        .bind(update.status)
        .bind(update.coach_experience)
        .bind(update.contact)
        .bind(update.language)
        .bind(update.country)
        .bind(update.sports)
        .bind(update.achievements)
        .bind(update.education)
        .bind(days.map(|d| d.monday))
        .bind(days.map(|d| d.tuesday))
        .bind(days.map(|d| d.wednesday))
        .bind(days.map(|d| d.thursday))
        .bind(days.map(|d| d.friday))
        .bind(days.map(|d| d.saturday))
        .bind(days.map(|d| d.sunday))
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user_id) = user_id else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            UPDATE users
            SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email)
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(update.first_name)
        .bind(update.last_name)
        .bind(update.email)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await?;

        self.find_trainer_by_id(trainer_id).await
    }

    async fn find_trainee(&self, trainee_id: i64) -> Result<Option<Trainee>, RepositoryError> {
        let row = sqlx::query_as::<_, TraineeRow>(
            r#"
            SELECT te.id, te.user_id, u.first_name, u.last_name, u.email
            FROM trainees te
            JOIN users u ON u.id = te.user_id
            WHERE te.id = $1
            "#,
        )
        .bind(trainee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Trainee {
            id: row.id,
            user_id: row.user_id,
            user: User {
                id: row.user_id,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
            },
        }))
    }

    async fn list_requests_for_trainer(
        &self,
        trainer_id: i64,
    ) -> Result<Vec<ProgramRequest>, RepositoryError> {
        let rows = sqlx::query_as::<_, RequestRow>(&format!(
            "{REQUEST_SELECT} WHERE r.trainer_id = $1 ORDER BY r.created_at DESC, r.id DESC"
        ))
        .bind(trainer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ProgramRequest::try_from).collect()
    }

    async fn find_request(
        &self,
        request_id: i64,
    ) -> Result<Option<ProgramRequest>, RepositoryError> {
        let row = sqlx::query_as::<_, RequestRow>(&format!("{REQUEST_SELECT} WHERE r.id = $1"))
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ProgramRequest::try_from).transpose()
    }

    async fn set_request_price(
        &self,
        request_id: i64,
        trainer_id: i64,
        price: i64,
        description: Option<String>,
    ) -> Result<Option<ProgramRequest>, RepositoryError> {
        let updated = sqlx::query(
            r#"
            UPDATE program_requests
            SET price = $2, description = COALESCE($3, description), status = $4
            WHERE id = $1 AND trainer_id = $5 AND status IN ($6, $4)
            "#,
        )
        .bind(request_id)
        .bind(price)
        .bind(description)
        .bind(RequestStatus::Priced.as_str())
        .bind(trainer_id)
        .bind(RequestStatus::Pending.as_str())
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_request(request_id).await
    }

    async fn insert_program(
        &self,
        program: NewTrainingProgram,
    ) -> Result<TrainingProgram, RepositoryError> {
        let row = sqlx::query_as::<_, ProgramRow>(
            r#"
            INSERT INTO training_programs (trainer_id, trainee_id, title, description, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, trainer_id, trainee_id, title, description, start_date, end_date, created_at
            "#,
        )
        .bind(program.trainer_id)
        .bind(program.trainee_id)
        .bind(program.title)
        .bind(program.description)
        .bind(program.start_date)
        .bind(program.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_program(
        &self,
        program_id: i64,
    ) -> Result<Option<TrainingProgram>, RepositoryError> {
        let row = sqlx::query_as::<_, ProgramRow>(
            r#"
            SELECT id, trainer_id, trainee_id, title, description, start_date, end_date, created_at
            FROM training_programs
            WHERE id = $1
            "#,
        )
        .bind(program_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TrainingProgram::from))
    }

    async fn insert_sport_activity(
        &self,
        activity: NewSportActivity,
    ) -> Result<SportActivity, RepositoryError> {
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            INSERT INTO sport_activities (program_id, name, day, sets, repetitions, duration_minutes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, program_id, name, day, sets, repetitions, duration_minutes
            "#,
        )
        .bind(activity.program_id)
        .bind(activity.name)
        .bind(activity.day.as_str())
        .bind(activity.sets)
        .bind(activity.repetitions)
        .bind(activity.duration_minutes)
        .fetch_one(&self.pool)
        .await?;

        let day = Weekday::from_str(&row.day).ok_or_else(|| {
            RepositoryError::CorruptRecord(format!(
                "sport activity {} has unknown day '{}'",
                row.id, row.day
            ))
        })?;

        Ok(SportActivity {
            id: row.id,
            program_id: row.program_id,
            name: row.name,
            day,
            sets: row.sets,
            repetitions: row.repetitions,
            duration_minutes: row.duration_minutes,
        })
    }

    async fn insert_report(&self, report: NewReport) -> Result<Report, RepositoryError> {
        let row = sqlx::query_as::<_, ReportRow>(
            r#"
            INSERT INTO reports (user_id, description)
            VALUES ($1, $2)
            RETURNING id, user_id, description, created_at
            "#,
        )
        .bind(report.user_id)
        .bind(report.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(Report {
            id: row.id,
            user_id: row.user_id,
            description: row.description,
            created_at: row.created_at,
        })
    }
}
