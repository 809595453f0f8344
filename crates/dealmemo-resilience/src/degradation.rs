//! Process-wide service degradation registry (spec.md §4.1).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Tracks which named services are currently available, and which
/// service names are critical. A request may proceed with degradation
/// iff every unavailable service it depends on is non-critical.
#[derive(Clone)]
pub struct DegradationManager {
    availability: Arc<RwLock<HashMap<String, bool>>>,
    critical_services: Arc<HashSet<String>>,
}

impl DegradationManager {
    pub fn new(critical_services: HashSet<String>) -> Self {
        Self {
            availability: Arc::new(RwLock::new(HashMap::new())),
            critical_services: Arc::new(critical_services),
        }
    }

    pub fn set_available(&self, service: &str, available: bool) {
        self.availability.write().unwrap().insert(service.to_string(), available);
    }

    pub fn is_available(&self, service: &str) -> bool {
        self.availability.read().unwrap().get(service).copied().unwrap_or(true)
    }

    pub fn is_critical(&self, service: &str) -> bool {
        self.critical_services.contains(service)
    }

    /// Whether a request depending on `services` may proceed, possibly
    /// degraded. Fails only if a *critical* service among `services` is
    /// unavailable.
    pub fn can_proceed(&self, services: &[&str]) -> bool {
        services
            .iter()
            .all(|service| self.is_available(service) || !self.is_critical(service))
    }

    /// Which of `services` are unavailable right now (used to populate
    /// memo warnings).
    pub fn unavailable_of(&self, services: &[&str]) -> Vec<String> {
        services
            .iter()
            .filter(|service| !self.is_available(service))
            .map(|service| service.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_critical_unavailability_allows_degraded_progress() {
        let mut critical = HashSet::new();
        critical.insert("llm".to_string());
        let manager = DegradationManager::new(critical);

        manager.set_available("benchmarks", false);
        assert!(manager.can_proceed(&["llm", "benchmarks"]));
    }

    #[test]
    fn critical_unavailability_blocks_progress() {
        let mut critical = HashSet::new();
        critical.insert("llm".to_string());
        let manager = DegradationManager::new(critical);

        manager.set_available("llm", false);
        assert!(!manager.can_proceed(&["llm", "benchmarks"]));
    }

    #[test]
    fn unknown_services_default_to_available() {
        let manager = DegradationManager::new(HashSet::new());
        assert!(manager.is_available("unregistered"));
    }
}
