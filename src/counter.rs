use log::debug;

/// Counts button activations across the whole workbench
#[derive(Debug, Default, Clone)]
pub struct ClickCounter {
    count: u64,
}

impl ClickCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one click and return the new total
    pub fn increment(&mut self) -> u64 {
        self.count += 1;
        debug!("Counter: {}", self.count);
        self.count
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_independent() {
        let mut first = ClickCounter::new();
        let mut second = ClickCounter::new();
        assert_eq!(first.increment(), 1);
        assert_eq!(first.increment(), 2);
        assert_eq!(second.increment(), 1);
        assert_eq!(first.count(), 2);
    }
}
