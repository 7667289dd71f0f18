//! Outcome of the sending stage

use lottery_core::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    pub pack: String,
    pub email: String,
}

#[derive(Debug)]
pub struct FailedDelivery {
    pub pack: String,
    pub email: String,
    pub error: Error,
}

/// Which recipients received their pack and which did not
#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub delivered: Vec<Delivered>,
    pub failed: Vec<FailedDelivery>,
}

impl DeliveryReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }

    pub(crate) fn record(&mut self, pack: &str, email: &str, outcome: lottery_core::Result<()>) {
        match outcome {
            Ok(()) => self.delivered.push(Delivered {
                pack: pack.to_string(),
                email: email.to_string(),
            }),
            Err(error) => self.failed.push(FailedDelivery {
                pack: pack.to_string(),
                email: email.to_string(),
                error,
            }),
        }
    }
}
