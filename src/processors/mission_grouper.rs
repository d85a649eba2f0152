use crate::models::Observation;
use std::collections::BTreeMap;
use tracing::warn;

/// Observations of each mission, in arrival order
pub type ObservationsByMission = BTreeMap<String, Vec<Observation>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    pub accepted: usize,
    pub skipped_without_mission: usize,
}

/// Accumulates observations per mission for one run
#[derive(Debug, Default)]
pub struct MissionGrouper {
    missions: ObservationsByMission,
    stats: GroupingStats,
}

impl MissionGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation. Records without a mission name are dropped.
    pub fn add(&mut self, observation: Observation) -> bool {
        let Some(mission) = observation.mission() else {
            warn!(
                "Skipping observation {} at {} without a mission name",
                observation.id.as_deref().unwrap_or("<no id>"),
                observation.timestamp
            );
            self.stats.skipped_without_mission += 1;
            return false;
        };

        let mission = mission.to_string();
        self.missions.entry(mission).or_default().push(observation);
        self.stats.accepted += 1;
        true
    }

    pub fn extend<I>(&mut self, observations: I)
    where
        I: IntoIterator<Item = Observation>,
    {
        for observation in observations {
            self.add(observation);
        }
    }

    pub fn stats(&self) -> &GroupingStats {
        &self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    pub fn into_missions(self) -> ObservationsByMission {
        self.missions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_by_mission() {
        let mut grouper = MissionGrouper::new();
        grouper.extend(vec![
            Observation::new(3).with_mission("W-2"),
            Observation::new(1).with_mission("W-1"),
            Observation::new(2).with_mission("W-2"),
        ]);

        assert_eq!(grouper.stats().accepted, 3);
        let missions = grouper.into_missions();
        assert_eq!(missions.keys().collect::<Vec<_>>(), vec!["W-1", "W-2"]);
        let w2: Vec<i64> = missions["W-2"].iter().map(|o| o.timestamp).collect();
        assert_eq!(w2, vec![3, 2]);
    }

    #[test]
    fn test_skips_observations_without_mission() {
        let mut grouper = MissionGrouper::new();
        assert!(!grouper.add(Observation::new(1)));
        assert!(!grouper.add(Observation::new(2).with_mission("")));
        assert!(grouper.add(Observation::new(3).with_mission("W-1")));

        assert_eq!(
            grouper.stats(),
            &GroupingStats {
                accepted: 1,
                skipped_without_mission: 2,
            }
        );
        assert!(!grouper.is_empty());
    }
}
