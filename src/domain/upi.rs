use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Payment apps a UPI import can be attributed to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UpiApp {
    #[default]
    GPay,
    PhonePe,
    Paytm,
    Bhim,
    AmazonPay,
}

impl UpiApp {
    pub const ALL: [UpiApp; 5] = [
        UpiApp::GPay,
        UpiApp::PhonePe,
        UpiApp::Paytm,
        UpiApp::Bhim,
        UpiApp::AmazonPay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UpiApp::GPay => "GPay",
            UpiApp::PhonePe => "PhonePe",
            UpiApp::Paytm => "Paytm",
            UpiApp::Bhim => "BHIM",
            UpiApp::AmazonPay => "Amazon Pay",
        }
    }

    /// Note attached to transactions imported from this app.
    pub fn payment_note(self) -> String {
        format!("Paid via {}", self.label())
    }
}

impl fmt::Display for UpiApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UpiApp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        UpiApp::ALL
            .into_iter()
            .find(|app| app.label().replace(' ', "").to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown UPI app `{s}`"))
    }
}
