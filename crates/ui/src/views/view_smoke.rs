use bridge_core::model::TodoDraft;
use chrono::NaiveDate;

use super::test_harness::{ViewKind, mount, sign_up_learner, test_services};

#[tokio::test(flavor = "current_thread")]
async fn onboarding_offers_login_and_sign_up_when_signed_out() {
    let mut harness = mount(ViewKind::Onboarding, test_services());
    let html = harness.render_until("Sign Up").await;
    assert!(html.contains("BrainBridge"), "missing brand in {html}");
    assert!(html.contains("Log In"), "missing login in {html}");
    assert!(html.contains("Sign Up"), "missing sign up in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn onboarding_offers_continue_when_signed_in() {
    let services = test_services();
    sign_up_learner(&services, true).await;
    let mut harness = mount(ViewKind::Onboarding, services);
    let html = harness.render_until("Continue").await;
    assert!(html.contains("Continue"), "missing continue in {html}");
    assert!(!html.contains("Sign Up"), "unexpected sign up in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn auth_forms_render_their_fields() {
    let mut login = mount(ViewKind::Login, test_services());
    let html = login.render_until("Welcome back!").await;
    assert!(html.contains("Password"), "missing password in {html}");

    let mut register = mount(ViewKind::Register, test_services());
    let html = register.render_until("Confirm password").await;
    assert!(html.contains("First name"), "missing first name in {html}");
    assert!(html.contains("terms and privacy policy"), "missing terms in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn iq_test_starts_on_first_question_with_full_timer() {
    let services = test_services();
    sign_up_learner(&services, false).await;
    let mut harness = mount(ViewKind::IqTest, services);
    let html = harness.render_until("Question 1 of 8").await;
    assert!(html.contains("Question 1 of 8"), "missing counter in {html}");
    assert!(html.contains("Time left: 10:00"), "missing timer in {html}");
    assert!(html.contains("Answered 0 of 8"), "missing footer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_selection_lists_every_course() {
    let services = test_services();
    sign_up_learner(&services, false).await;
    let mut harness = mount(ViewKind::CourseSelection, services);
    let html = harness.render_until("Choose Your Course").await;
    for name in ["NEET", "JEE", "GRE", "GATE", "TOEFL"] {
        assert!(html.contains(name), "missing {name} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_shows_greeting_course_and_timetable() {
    let services = test_services();
    sign_up_learner(&services, true).await;
    let mut harness = mount(ViewKind::Dashboard, services);
    // The fixed clock sits at 22:13 UTC.
    let html = harness.render_until("Good evening, Ada!").await;
    assert!(html.contains("Good evening, Ada!"), "missing greeting in {html}");
    assert!(html.contains("NEET"), "missing course in {html}");
    assert!(html.contains("110 (Above average)"), "missing iq in {html}");
    assert!(html.contains("Weekly timetable"), "missing timetable in {html}");
    assert!(html.contains("Weekly Quiz (All Subjects)"), "missing friday quiz in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_reports_missing_session() {
    let mut harness = mount(ViewKind::Dashboard, test_services());
    let html = harness.render_until("session has ended").await;
    assert!(html.contains("Please log in again"), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_opens_on_first_biology_question() {
    let services = test_services();
    sign_up_learner(&services, true).await;
    let mut harness = mount(ViewKind::Quiz, services);
    let html = harness.render_until("Question 1 of 10").await;
    assert!(html.contains("Biology Quiz"), "missing title in {html}");
    assert!(html.contains("Show explanation"), "missing toggle in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chatbot_shows_greeting_and_offline_notice() {
    let services = test_services();
    sign_up_learner(&services, true).await;
    let mut harness = mount(ViewKind::Chatbot, services);
    let html = harness.render_until("study assistant").await;
    assert!(html.contains("BrainBridge study assistant"), "missing greeting in {html}");
    assert!(html.contains("assistant is offline"), "missing notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn todo_lists_tasks_and_flags_overdue() {
    let services = test_services();
    let session = sign_up_learner(&services, true).await;
    services
        .planner()
        .add(
            session.user_id(),
            TodoDraft::new("Revise cell division", NaiveDate::from_ymd_opt(2023, 11, 1)),
        )
        .await
        .expect("add todo");

    let mut harness = mount(ViewKind::Todo, services);
    let html = harness.render_until("Revise cell division").await;
    assert!(html.contains("Revise cell division"), "missing task in {html}");
    assert!(html.contains("0/1 done"), "missing counts in {html}");
    assert!(html.contains("1 overdue"), "missing overdue count in {html}");
    assert!(html.contains("Nov 1"), "missing due date in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn forum_lists_seeded_posts_and_categories() {
    let services = test_services();
    sign_up_learner(&services, true).await;
    services.forum().seed_samples().await.expect("seed");

    let mut harness = mount(ViewKind::Forum, services);
    let html = harness.render_until("Tips for memorizing cell structures?").await;
    assert!(html.contains("Tips for memorizing cell structures?"), "missing post in {html}");
    assert!(html.contains("All posts"), "missing filter in {html}");
    assert!(html.contains("Biology ("), "missing category count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_shows_personal_information() {
    let services = test_services();
    sign_up_learner(&services, true).await;
    let mut harness = mount(ViewKind::Profile, services);
    let html = harness.render_until("Personal Information").await;
    assert!(html.contains("Ada Lovelace"), "missing name in {html}");
    assert!(html.contains("ada@example.com"), "missing email in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn not_found_echoes_the_path() {
    let mut harness = mount(ViewKind::NotFound, test_services());
    let html = harness.render_until("Page not found").await;
    assert!(html.contains("/missing/page"), "missing path in {html}");
}
