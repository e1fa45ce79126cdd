// Comprehensive tests for BookingFlow
// Tests the whole booking journey against the canned fixture gateway,
// without requiring a running backend

use std::sync::Arc;

use chrono::NaiveDate;
use turnero::events::EventKind;
use turnero::flow::BookingFlow;
use turnero::gateway::FixtureGateway;
use turnero::schedule::format_long_date;
use turnero::validation::{MSG_PHONE_INVALID_CHARS, MSG_PHONE_TOO_SHORT};
use turnero::wizard::WizardStep;
use turnero::BookingError;

/// Create a test flow backed by the fixture gateway
fn create_test_flow() -> BookingFlow {
    BookingFlow::builder()
        .gateway(Arc::new(FixtureGateway::new()))
        .build()
        .expect("Failed to build test flow")
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date")
}

/// Drive a fresh flow up to the date step with the first service and
/// the given barber choice
async fn flow_at_date_step(barber_index: Option<usize>) -> BookingFlow {
    let mut flow = create_test_flow();
    flow.start().await;

    let service = flow.services().items()[0].clone();
    flow.select_service(service).await.expect("select service");

    let barber = barber_index.map(|i| flow.barbers().items()[i].clone());
    flow.select_barber(barber).await.expect("select barber");
    flow
}

#[tokio::test]
async fn test_catalog_and_roster_load() {
    let mut flow = create_test_flow();
    flow.start().await;

    let names: Vec<&str> = flow
        .services()
        .items()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Corte de Cabello", "Barba", "Corte + Barba", "Afeitado Clásico"]
    );

    let service = flow.services().items()[0].clone();
    flow.select_service(service).await.unwrap();
    assert_eq!(flow.barbers().items().len(), 3);
    assert!(flow.barbers().items().iter().all(|b| b.active));
}

#[tokio::test]
async fn test_any_barber_merges_both_schedules() {
    let mut flow = flow_at_date_step(None).await;
    flow.select_date(monday()).await.unwrap();

    let slots = flow.wizard().resolved_slots();
    // Two interleaved ten-slot schedules, merged and sorted.
    assert_eq!(slots.len(), 20);
    assert_eq!(slots[0], "09:00");
    assert_eq!(slots[1], "09:15");
    assert_eq!(slots[19], "16:15");
    let mut sorted = slots.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(slots, sorted);
}

#[tokio::test]
async fn test_specific_barber_keeps_own_schedule() {
    let mut flow = flow_at_date_step(Some(0)).await;
    flow.select_date(monday()).await.unwrap();

    let slots = flow.wizard().resolved_slots();
    assert_eq!(slots.len(), 10);
    assert_eq!(slots[0], "09:00");
    assert!(!slots.contains(&"09:15".to_string()));
}

#[tokio::test]
async fn test_barber_without_schedule_yields_no_slots() {
    // The third fixture barber has no published schedule.
    let mut flow = flow_at_date_step(Some(2)).await;
    flow.select_date(monday()).await.unwrap();

    assert!(flow.availability_status().error().is_none());
    assert!(flow.wizard().resolved_slots().is_empty());
}

#[tokio::test]
async fn test_unlisted_time_is_rejected() {
    let mut flow = flow_at_date_step(None).await;
    flow.select_date(monday()).await.unwrap();

    let err = flow.select_time("08:00").unwrap_err();
    assert!(matches!(err, BookingError::SlotUnavailable(_)));
    assert!(flow.wizard().selected_time().is_none());
}

#[tokio::test]
async fn test_continue_requires_date_and_time() {
    let mut flow = flow_at_date_step(None).await;
    flow.select_date(monday()).await.unwrap();

    assert!(flow.go_next().is_err());
    flow.select_time("09:00").unwrap();
    flow.go_next().unwrap();
    assert_eq!(flow.wizard().step(), WizardStep::Contact);
}

#[tokio::test]
async fn test_back_navigation_preserves_selections() {
    let mut flow = flow_at_date_step(Some(0)).await;
    flow.select_date(monday()).await.unwrap();
    flow.select_time("09:00").unwrap();
    flow.go_next().unwrap();

    flow.go_back().await.unwrap();
    flow.go_back().await.unwrap();
    flow.go_back().await.unwrap();
    assert_eq!(flow.wizard().step(), WizardStep::Service);

    // Everything picked along the way is still there.
    assert!(flow.wizard().selected_service().is_some());
    assert!(flow.wizard().selected_barber().is_some());
    assert_eq!(flow.wizard().selected_date(), Some(monday()));
    assert_eq!(flow.wizard().selected_time(), Some("09:00"));
}

#[tokio::test]
async fn test_two_character_name_passes_validation() {
    let mut flow = flow_at_date_step(None).await;
    flow.select_date(monday()).await.unwrap();
    flow.select_time("09:00").unwrap();
    flow.go_next().unwrap();

    flow.set_contact_name("Jo");
    flow.set_contact_phone("12345678");

    let confirmation = flow.submit().await.expect("booking accepted");
    assert_eq!(confirmation.details.customer_name, "Jo");
}

#[tokio::test]
async fn test_short_phone_is_rejected_with_message() {
    let mut flow = flow_at_date_step(None).await;
    flow.select_date(monday()).await.unwrap();
    flow.select_time("09:00").unwrap();
    flow.go_next().unwrap();

    flow.set_contact_name("Juan Pérez");
    flow.set_contact_phone("123");

    let err = flow.submit().await.unwrap_err();
    match err {
        BookingError::Validation(errors) => {
            assert_eq!(errors.phone.as_deref(), Some(MSG_PHONE_TOO_SHORT));
            assert!(errors.name.is_none());
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(!flow.wizard().is_confirmed());
}

#[tokio::test]
async fn test_untouched_phone_reports_length_message() {
    let mut flow = flow_at_date_step(None).await;
    flow.select_date(monday()).await.unwrap();
    flow.select_time("09:00").unwrap();
    flow.go_next().unwrap();

    // Name filled in, phone field never touched.
    flow.set_contact_name("Juan Pérez");

    let err = flow.submit().await.unwrap_err();
    match err {
        BookingError::Validation(errors) => {
            assert_eq!(errors.phone.as_deref(), Some(MSG_PHONE_TOO_SHORT));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_phone_with_letters_reports_invalid_characters() {
    let mut flow = flow_at_date_step(None).await;
    flow.select_date(monday()).await.unwrap();
    flow.select_time("09:00").unwrap();
    flow.go_next().unwrap();

    flow.set_contact_name("Juan Pérez");
    flow.set_contact_phone("12a45678");

    let err = flow.submit().await.unwrap_err();
    match err {
        BookingError::Validation(errors) => {
            assert_eq!(errors.phone.as_deref(), Some(MSG_PHONE_INVALID_CHARS));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // Editing the field clears its error; resubmitting succeeds.
    flow.set_contact_phone("11 4567-8901");
    assert!(flow.wizard().validation().phone.is_none());
    flow.submit().await.expect("booking accepted after fix");
}

#[tokio::test]
async fn test_submission_payload_echoes_selections() {
    let mut flow = flow_at_date_step(Some(1)).await;
    flow.select_date(monday()).await.unwrap();
    flow.select_time("09:15").unwrap();
    flow.go_next().unwrap();

    flow.set_contact_name("  Ana Suárez  ");
    flow.set_contact_phone(" 11 2345-6789 ");
    flow.set_contact_notes("Sin mucho corte a los costados");

    let confirmation = flow.submit().await.unwrap();
    let details = &confirmation.details;
    assert_eq!(details.service_id, 1);
    assert_eq!(details.barber_id, Some(2));
    assert_eq!(details.date, monday());
    assert_eq!(details.time, "09:15");
    assert_eq!(details.customer_name, "Ana Suárez");
    assert_eq!(details.customer_phone, "11 2345-6789");
    assert_eq!(
        details.notes.as_deref(),
        Some("Sin mucho corte a los costados")
    );
}

#[tokio::test]
async fn test_confirmed_booking_is_terminal() {
    let mut flow = flow_at_date_step(None).await;
    flow.select_date(monday()).await.unwrap();
    flow.select_time("09:00").unwrap();
    flow.go_next().unwrap();
    flow.set_contact_name("Juan Pérez");
    flow.set_contact_phone("12345678");
    flow.submit().await.unwrap();

    let service = flow.services().items()[1].clone();
    assert!(flow.select_service(service).await.is_err());
    assert!(flow.go_back().await.is_err());
    assert!(flow.submit().await.is_err());
    assert!(flow.wizard().is_confirmed());
}

#[tokio::test]
async fn test_sequential_bookings_get_increasing_ids() {
    let gateway = Arc::new(FixtureGateway::new());

    for expected_id in 1..=2 {
        let mut flow = BookingFlow::builder()
            .gateway(gateway.clone())
            .build()
            .unwrap();
        flow.start().await;
        let service = flow.services().items()[0].clone();
        flow.select_service(service).await.unwrap();
        flow.select_barber(None).await.unwrap();
        flow.select_date(monday()).await.unwrap();
        flow.select_time("09:00").unwrap();
        flow.go_next().unwrap();
        flow.set_contact_name("Juan Pérez");
        flow.set_contact_phone("12345678");

        let confirmation = flow.submit().await.unwrap();
        assert_eq!(confirmation.id, expected_id);
    }
}

#[tokio::test]
async fn test_step_events_are_published_in_order() {
    let mut flow = flow_at_date_step(None).await;
    let mut events = flow.subscribe_events();

    flow.select_date(monday()).await.unwrap();
    flow.select_time("09:00").unwrap();
    flow.go_next().unwrap();

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event.kind);
    }
    assert!(seen
        .iter()
        .any(|k| matches!(k, EventKind::AvailabilityLoaded { slot_count: 20 })));
    assert!(seen
        .iter()
        .any(|k| matches!(k, EventKind::StepChanged(WizardStep::Contact))));
}

#[tokio::test]
async fn test_summary_reflects_selections() {
    let mut flow = flow_at_date_step(Some(0)).await;
    flow.select_date(monday()).await.unwrap();
    flow.select_time("10:30").unwrap();

    let summary = flow.wizard().summary().expect("summary available");
    assert_eq!(summary.service, "Corte de Cabello");
    assert_eq!(summary.barber.as_deref(), Some("Jack Rodriguez"));
    assert_eq!(summary.time, "10:30");
    assert_eq!(summary.price, "1500.00");
    assert_eq!(format_long_date(summary.date), "lunes, 15 de enero de 2024");
}

#[tokio::test]
async fn test_any_barber_summary_uses_fallback_wording() {
    let mut flow = flow_at_date_step(None).await;
    flow.select_date(monday()).await.unwrap();
    flow.select_time("09:00").unwrap();

    let summary = flow.wizard().summary().expect("summary available");
    assert!(summary.barber.is_none());
    assert_eq!(summary.barber_display(), "Cualquier barbero disponible");
}
