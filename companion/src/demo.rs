//! End-to-end walk through one family account.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use futures::{Stream, StreamExt};
use tracing::info;

use crate::container::Services;
use common::{AppError, AppResult};
use domain::{
    AuthUser, ChatMessage, DietPlan, DocumentType, Gender, HealthMetric, MedicalDocument,
    MetricType, Profile, Reminder, ReminderType, Sender, ShareContentType, ShareableContent,
};

const SAMPLE_DOCUMENT_NAME: &str = "blood-panel.txt";
const SHARE_LIFETIME_DAYS: i64 = 7;
const SAMPLE_DOCUMENT: &[u8] = b"Complete blood count\n\
Hemoglobin: 13.2 g/dL (reference 11.5-15.5)\n\
Leukocytes: 7,400 /uL (reference 4,500-13,500)\n\
Platelets: 285,000 /uL (reference 150,000-450,000)\n";

/// Who the walk-through is run for
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub profile_name: String,
    pub age: i32,
    pub gender: Gender,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            uid: "demo-user".to_string(),
            email: Some("family@example.com".to_string()),
            display_name: Some("Demo Family".to_string()),
            profile_name: "Ana".to_string(),
            age: 8,
            gender: Gender::Female,
        }
    }
}

/// Everything the walk-through produced
#[derive(Debug)]
pub struct DemoReport {
    pub user: AuthUser,
    pub profile: Profile,
    pub reminders: Vec<Reminder>,
    pub weights: Vec<HealthMetric>,
    pub document: MedicalDocument,
    pub assistant_reply: String,
    pub diet_plan: DietPlan,
    pub share_link: String,
}

/// Wait for the next snapshot of a live feed
async fn next_snapshot<S, T>(feed: &mut S, name: &str) -> AppResult<Vec<T>>
where
    S: Stream<Item = AppResult<Vec<T>>> + Unpin,
{
    feed.next()
        .await
        .ok_or_else(|| AppError::internal(format!("{name} feed closed")))?
}

/// Run the scenario against `services` and sign out when done.
pub async fn run_demo(services: &Services, options: DemoOptions) -> AppResult<DemoReport> {
    let mut identity = AuthUser::new(options.uid);
    identity.email = options.email;
    identity.display_name = options.display_name;
    let token = services.identity().mint_dev_token(&identity)?;

    let auth = services.auth();
    let user = auth.sign_in_with_token(&token).await?;
    info!(uid = %user.uid, "Hello, {}", user.greeting_name());

    let profiles = services.profiles();
    let profile_id = profiles
        .create_profile(Profile::new(
            &user.uid,
            options.profile_name,
            options.age,
            options.gender,
        ))
        .await?;
    let profile = profiles.get_profile(&profile_id).await?;

    let reminders = scheduled_reminders(services, &profile_id, Utc::now()).await?;

    let metrics = services.metrics();
    metrics
        .add_metric(HealthMetric::new(
            &profile_id,
            MetricType::Weight,
            27.5,
            "kg",
            Utc::now(),
        ))
        .await?;
    let mut weight_feed = metrics.metrics_for_profile(&profile_id, MetricType::Weight);
    let weights = next_snapshot(&mut weight_feed, "weight").await?;
    weight_feed.cancel();

    let documents = services.documents();
    let document_id = documents
        .upload_document(
            &profile_id,
            SAMPLE_DOCUMENT_NAME,
            DocumentType::Exam,
            SAMPLE_DOCUMENT.to_vec(),
        )
        .await?;
    let summary = services
        .analyses()
        .analyze_document(&document_id, SAMPLE_DOCUMENT)
        .await?;
    documents.record_analysis(&document_id, summary).await?;
    let document = documents.get_document(&document_id).await?;

    let assistant_reply = ask_assistant(
        services,
        &user.uid,
        &profile_id,
        "Is the blood panel normal?",
    )
    .await?;

    let diet_plan = services.diet().generate_diet_plan(&profile).await?;

    let share_link = services
        .shares()
        .create_shareable_link(
            ShareableContent::new(&user.uid, &profile_id, ShareContentType::DietPlan, &diet_plan.id)
                .expiring_at(Utc::now() + Duration::days(SHARE_LIFETIME_DAYS)),
        )
        .await?;

    auth.sign_out().await?;

    Ok(DemoReport {
        user,
        profile,
        reminders,
        weights,
        document,
        assistant_reply,
        diet_plan,
        share_link,
    })
}

/// Schedule tomorrow's appointment, then today's medication, and return the
/// feed's view once both are in.
async fn scheduled_reminders(
    services: &Services,
    profile_id: &str,
    now: DateTime<Utc>,
) -> AppResult<Vec<Reminder>> {
    let reminders = services.reminders();
    let mut feed = reminders.reminders_for_profile(profile_id);
    next_snapshot(&mut feed, "reminder").await?;

    reminders
        .create_reminder(Reminder::new(
            profile_id,
            ReminderType::Appointment,
            "Pediatrician check-up",
            now + Duration::days(1),
        ))
        .await?;
    next_snapshot(&mut feed, "reminder").await?;

    reminders
        .create_reminder(Reminder::new(
            profile_id,
            ReminderType::Medication,
            "Vitamin D drops",
            now + Duration::hours(2),
        ))
        .await?;
    let scheduled = next_snapshot(&mut feed, "reminder").await?;
    feed.cancel();
    Ok(scheduled)
}

/// Post a question to the profile's conversation and store the reply
async fn ask_assistant(
    services: &Services,
    user_id: &str,
    profile_id: &str,
    question: &str,
) -> AppResult<String> {
    let chat = services.chat();
    let mut conversation = chat.messages(user_id, profile_id);
    let history = next_snapshot(&mut conversation, "chat").await?;
    conversation.cancel();

    let asked = ChatMessage::new(user_id, profile_id, Sender::User, question);
    chat.send_message(asked.clone()).await?;
    let answer = chat.ai_response(question, &history).await?;
    chat.send_message(asked.reply(answer.clone())).await?;
    Ok(answer)
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Signed in as {} ({})", self.user.greeting_name(), self.user.uid)?;
        writeln!(
            f,
            "Profile {} \"{}\", {} years, child: {}",
            self.profile.id, self.profile.name, self.profile.age, self.profile.is_child
        )?;

        writeln!(f, "Reminders:")?;
        for reminder in &self.reminders {
            writeln!(
                f,
                "  {} [{}] {}",
                reminder.date_time.format("%Y-%m-%d %H:%M"),
                reminder.reminder_type,
                reminder.title
            )?;
        }

        writeln!(f, "Weight:")?;
        for metric in &self.weights {
            writeln!(
                f,
                "  {} {} on {}",
                metric.value,
                metric.unit,
                metric.date.format("%Y-%m-%d")
            )?;
        }

        writeln!(
            f,
            "Document {} ({}) analysed: {}",
            self.document.document_name, self.document.file_url, self.document.is_analyzed
        )?;
        if let Some(summary) = &self.document.ai_analysis_summary {
            writeln!(f, "{summary}")?;
        }

        writeln!(f, "Assistant: {}", self.assistant_reply)?;

        writeln!(f, "Diet plan, {} kcal/day:", self.diet_plan.daily_calories)?;
        for meal in &self.diet_plan.meals {
            writeln!(f, "  {} {} ({} kcal)", meal.time, meal.name, meal.calories())?;
        }

        write!(f, "Share link: {}", self.share_link)
    }
}
