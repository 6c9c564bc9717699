//! Bounded price window

use super::PricePoint;
use crate::error::{EngineError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::VecDeque;

/// The most recent `capacity` price points in insertion order
#[derive(Debug, Clone)]
pub struct PriceWindow {
    capacity: usize,
    points: VecDeque<PricePoint>,
}

impl PriceWindow {
    /// Create an empty window holding at most `capacity` points
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            points: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    /// Append a price, evicting the oldest points beyond capacity
    pub fn push(&mut self, timestamp: DateTime<Utc>, price: Decimal) -> Result<()> {
        if price <= Decimal::ZERO {
            return Err(EngineError::InvalidInput(format!(
                "price must be positive, got {}",
                price
            )));
        }

        self.points.push_back(PricePoint::new(timestamp, price));
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
        Ok(())
    }

    /// Most recent point
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.back()
    }

    /// Number of points held
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate points oldest first
    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }

    /// Prices oldest first, as floats for indicator math
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(PricePoint::price_f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    #[test]
    fn test_push_and_latest() {
        let mut window = PriceWindow::new(5);
        let now = Utc::now();
        window.push(now, dec!(94250)).unwrap();
        window.push(now + Duration::seconds(30), dec!(94300)).unwrap();

        assert_eq!(window.len(), 2);
        assert_eq!(window.latest().unwrap().price, dec!(94300));
    }

    #[test]
    fn test_evicts_oldest_beyond_capacity() {
        let mut window = PriceWindow::new(3);
        let now = Utc::now();
        for i in 0..5 {
            window
                .push(now + Duration::seconds(i), dec!(100) + Decimal::from(i))
                .unwrap();
        }

        assert_eq!(window.len(), 3);
        assert_eq!(window.prices(), vec![102.0, 103.0, 104.0]);
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let mut window = PriceWindow::new(3);
        assert!(window.push(Utc::now(), dec!(0)).is_err());
        assert!(window.push(Utc::now(), dec!(-5)).is_err());
        assert!(window.is_empty());
    }

    #[test]
    fn test_zero_capacity_keeps_one_point() {
        let mut window = PriceWindow::new(0);
        window.push(Utc::now(), dec!(1)).unwrap();
        window.push(Utc::now(), dec!(2)).unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window.capacity(), 1);
    }
}
