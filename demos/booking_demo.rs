// Example demonstrating programmatic use of the booking flow
// Runs entirely on the bundled fixtures; no backend required
//
// Run with:
//     cargo run --example booking_demo

use std::sync::Arc;

use chrono::NaiveDate;
use turnero::{BookingFlow, EventKind, FixtureGateway};

#[tokio::main]
async fn main() -> turnero::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut flow = BookingFlow::builder()
        .gateway(Arc::new(FixtureGateway::new()))
        .build()?;
    let mut events = flow.subscribe_events();

    // Step 1: pick a service from the catalog
    flow.start().await;
    println!("Servicios:");
    for service in flow.services().items() {
        println!(
            "  [{}] {} ({} min, ${})",
            service.id, service.name, service.duration_minutes, service.price
        );
    }
    let service = flow.services().items()[0].clone();
    flow.select_service(service).await?;

    // Step 2: no barber preference
    println!("\nBarberos:");
    for barber in flow.barbers().items() {
        println!("  [{}] {}", barber.id, barber.full_name);
    }
    flow.select_barber(None).await?;

    // Step 3: date and time
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
    flow.select_date(date).await?;
    let slots = flow.wizard().resolved_slots();
    println!("\nHorarios para {date}: {}", slots.join(", "));
    flow.select_time(&slots[0])?;
    flow.go_next()?;

    // Step 4: contact details and submission
    flow.set_contact_name("Juan Pérez");
    flow.set_contact_phone("11 4567-8901");
    flow.set_contact_notes("Primera visita");

    if let Some(summary) = flow.wizard().summary() {
        println!("\nResumen:");
        println!("  Servicio: {} (${})", summary.service, summary.price);
        println!("  Barbero:  {}", summary.barber_display());
        println!("  Fecha:    {} a las {}", summary.date_display(), summary.time);
    }

    let confirmation = flow.submit().await?;
    println!("\nReserva confirmada con id {}", confirmation.id);

    // Everything the flow announced along the way
    println!("\nEventos:");
    while let Ok(event) = events.try_recv() {
        match event.kind {
            EventKind::StepChanged(step) => println!("  paso -> {}", step.label()),
            EventKind::ServicesLoaded { count } => println!("  {count} servicios cargados"),
            EventKind::BarbersLoaded { count } => println!("  {count} barberos cargados"),
            EventKind::AvailabilityLoaded { slot_count } => {
                println!("  {slot_count} horarios disponibles")
            }
            EventKind::BookingConfirmed(c) => println!("  reserva {} confirmada", c.id),
            other => println!("  {other:?}"),
        }
    }

    Ok(())
}
