//! Demo fixtures around Dampalit, Malabon: four response teams with staggered
//! coverage zones, one open incident per zone, and their equipment. Written
//! straight through the repositories so startup seeding emits no events.

use qdart_engine::CoordinationStore;
use qdart_storage::{
    AssetRepository, NewAsset, NewReport, NewTeam, ReportRepository, StorageError, TeamRepository,
};
use tracing::info;

const CENTER: (f64, f64) = (14.6944, 120.9324);
const NORTH: (f64, f64) = (14.7200, 120.9350);
const SOUTH: (f64, f64) = (14.6600, 120.9300);

fn team(
    name: &str,
    department: &str,
    personnel: u32,
    base: (f64, f64),
    radius_km: f64,
) -> NewTeam {
    NewTeam {
        name: name.to_string(),
        department: department.to_string(),
        personnel_count: Some(personnel),
        base_latitude: Some(base.0),
        base_longitude: Some(base.1),
        coverage_radius_km: Some(radius_km),
    }
}

fn report(title: &str, description: &str, location: &str, position: (f64, f64)) -> NewReport {
    NewReport {
        title: title.to_string(),
        description: Some(description.to_string()),
        location: Some(location.to_string()),
        latitude: Some(position.0),
        longitude: Some(position.1),
        ..NewReport::default()
    }
}

fn asset(name: &str, kind: &str, status: &str, team: &qdart_core::Team) -> NewAsset {
    NewAsset {
        name: name.to_string(),
        kind: kind.to_string(),
        status: status.parse().ok(),
        location: None,
        team_id: Some(team.id),
    }
}

pub async fn demo_fixtures(store: &dyn CoordinationStore) -> Result<(), StorageError> {
    let fire = TeamRepository::create(store, team("Station 1 (Alpha)", "BFP", 12, CENTER, 1.0)).await?;
    let police = TeamRepository::create(store, team("SWAT Unit", "PNP", 10, NORTH, 1.0)).await?;
    let medics = TeamRepository::create(store, team("Medic Team Alpha", "EMS", 4, SOUTH, 1.0)).await?;
    // Wide-area squad: sees every zone.
    let rescue = TeamRepository::create(store, team("Rescue Squad", "Barangay", 15, CENTER, 10.0)).await?;

    for draft in [
        report(
            "Flood at Dampalit Center",
            "Knee deep flood.",
            "Dampalit Proper",
            CENTER,
        ),
        report(
            "Fire at North Border",
            "Grass fire near boundary.",
            "Obando Boundary",
            NORTH,
        ),
        report(
            "Accident at South Highway",
            "Motorcycle crash.",
            "Highway Intersection",
            SOUTH,
        ),
    ] {
        ReportRepository::create(store, draft).await?;
    }

    for draft in [
        asset("Fire Truck 01", "Vehicle", "Available", &fire),
        asset("Fire Truck 02", "Vehicle", "Maintenance", &fire),
        asset("Patrol Car 101", "Vehicle", "Deployed", &police),
        asset("Surveillance Drone", "Drone", "Available", &police),
        asset("Ambulance A", "Vehicle", "Available", &medics),
        asset("Ambulance B", "Vehicle", "Available", &medics),
        asset("Rescue Boat", "Vehicle", "Available", &rescue),
        asset("Megaphone System", "Communication", "Available", &rescue),
    ] {
        AssetRepository::create(store, draft).await?;
    }

    info!("demo fixtures seeded");
    Ok(())
}
