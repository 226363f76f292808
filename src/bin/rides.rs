use chrono::NaiveDate;
use lending::core::lending::LendingResult;
use lending::core::repository::RepositoryStore;
use lending::pricing::Discount;
use lending::rides::domain::model::VehicleInfo;
use lending::rides::domain::RideOutcome;
use lending::rides::dto::DriverDto;
use lending::rides::factory::create_ride_service;
use lending::utils::telemetry::setup_tracing;

// Dispatches the same trip at three different hours so each fare strategy
// shows up once, then rates the completed rides.
#[tokio::main]
async fn main() -> LendingResult<()> {
    setup_tracing();
    let ride_svc = create_ride_service(RepositoryStore::Memory).await;

    let driver = ride_svc.register_driver(&DriverDto::new("Dana", "dana@rides.io",
                                                          VehicleInfo {
                                                              make: "Toyota".to_string(),
                                                              model: "Prius".to_string(),
                                                              plate: "RID-3000".to_string(),
                                                          })).await?;
    tracing::info!(driver_id = driver.driver_id, "registered driver");

    let day = NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date");
    for (hour, label) in [(12u32, "midday"), (8, "morning rush"), (18, "evening traffic")] {
        let requested_at = day.and_hms_opt(hour, 0, 0).expect("valid time");
        let ride = match ride_svc.request_ride("pat", "Airport", "Downtown", requested_at).await? {
            RideOutcome::Dispatched(ride) => ride,
            RideOutcome::NoDriverAvailable => {
                tracing::warn!(label, "no driver available");
                continue;
            }
        };
        tracing::info!(label, pricing = %ride.pricing, "dispatched");

        // ten kilometers on a five dollar base, ten percent off
        let completed = ride_svc.complete_ride(ride.ride_id.as_str(), 10.0, 5.0,
                                               Discount::percentage(10.0)?,
                                               requested_at + chrono::Duration::minutes(25)).await?;
        tracing::info!(label, fare = completed.fare, "completed");

        // a six is ignored, the five counts
        ride_svc.rate_ride(ride.ride_id.as_str(), 6).await?;
        ride_svc.rate_ride(ride.ride_id.as_str(), 5).await?;
    }

    let history = ride_svc.ride_history("pat").await?;
    tracing::info!(rides = history.len(), "passenger history");
    Ok(())
}
