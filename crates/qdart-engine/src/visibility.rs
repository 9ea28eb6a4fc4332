use qdart_core::{Report, Team};
use qdart_geo::{Coordinate, CoverageArea};

/// Visibility context of a read: everything, or geofenced to one team's area
/// of responsibility.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Unscoped,
    Team(&'a Team),
}

pub fn coverage_of(team: &Team) -> Option<CoverageArea> {
    team.base_position()
        .map(|(lat, lng)| CoverageArea::new(Coordinate::new(lat, lng), team.coverage_radius_km))
}

/// Pure filter over a report snapshot. A team without base coordinates has no
/// geofence and sees the unscoped view; with one, a report is visible iff it
/// carries coordinates inside the coverage area (boundary inclusive).
pub fn filter_reports(reports: Vec<Report>, scope: Scope<'_>) -> Vec<Report> {
    let area = match scope {
        Scope::Unscoped => return reports,
        Scope::Team(team) => match coverage_of(team) {
            Some(area) => area,
            None => return reports,
        },
    };

    reports
        .into_iter()
        .filter(|report| match report.position() {
            Some((lat, lng)) => area.contains(Coordinate::new(lat, lng)),
            None => false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdart_core::{DamageLevel, ReportId, ReportStatus, TeamId, TeamStatus};

    fn report(id: u64, position: Option<(f64, f64)>) -> Report {
        Report {
            id: ReportId::from_u64(id),
            title: format!("report {id}"),
            description: None,
            status: ReportStatus::Active,
            timestamp: "2026-08-23 00:00:00".to_string(),
            location: None,
            latitude: position.map(|(lat, _)| lat),
            longitude: position.map(|(_, lng)| lng),
            damage_level: DamageLevel::Pending,
            image_ref: None,
        }
    }

    fn team(base: Option<(f64, f64)>, radius_km: f64) -> Team {
        Team {
            id: TeamId::from_u64(1),
            name: "Station 1 (Alpha)".to_string(),
            department: "BFP".to_string(),
            status: TeamStatus::Idle,
            personnel_count: 12,
            current_task: None,
            base_latitude: base.map(|(lat, _)| lat),
            base_longitude: base.map(|(_, lng)| lng),
            coverage_radius_km: radius_km,
        }
    }

    // The seed scenario: three incidents spread around Dampalit, ~3 km apart.
    const CENTER: (f64, f64) = (14.6944, 120.9324);
    const NORTH: (f64, f64) = (14.7200, 120.9350);
    const SOUTH: (f64, f64) = (14.6600, 120.9300);

    fn snapshot() -> Vec<Report> {
        vec![
            report(1, Some(CENTER)),
            report(2, Some(NORTH)),
            report(3, Some(SOUTH)),
            report(4, None),
        ]
    }

    #[test]
    fn unscoped_returns_everything_including_unlocated() {
        let filtered = filter_reports(snapshot(), Scope::Unscoped);
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn narrow_team_sees_only_its_zone() {
        let station = team(Some(CENTER), 1.0);
        let filtered = filter_reports(snapshot(), Scope::Team(&station));
        let ids: Vec<u64> = filtered.iter().map(|r| r.id.as_u64()).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn wide_team_sees_every_located_report() {
        let rescue = team(Some(CENTER), 10.0);
        let filtered = filter_reports(snapshot(), Scope::Team(&rescue));
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|r| r.position().is_some()));
    }

    #[test]
    fn team_without_base_behaves_as_unscoped() {
        let roaming = team(None, 1.0);
        let filtered = filter_reports(snapshot(), Scope::Team(&roaming));
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn filtering_is_idempotent() {
        let station = team(Some(CENTER), 1.0);
        let once = filter_reports(snapshot(), Scope::Team(&station));
        let twice = filter_reports(once.clone(), Scope::Team(&station));
        assert_eq!(once, twice);
    }
}
