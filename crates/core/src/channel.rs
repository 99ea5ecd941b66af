//! Delivery channels and how many chips each may show.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The surface a chip list is rendered on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[default]
    Web,
    Whatsapp,
}

/// Maximum number of chips per channel.
pub const CHANNEL_LIMITS: [(Channel, usize); 2] = [(Channel::Web, 6), (Channel::Whatsapp, 3)];

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Web, Channel::Whatsapp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Web => "web",
            Channel::Whatsapp => "whatsapp",
        }
    }

    /// Chip limit from [`CHANNEL_LIMITS`].
    pub fn limit(&self) -> usize {
        CHANNEL_LIMITS
            .iter()
            .find(|(channel, _)| channel == self)
            .map(|(_, limit)| *limit)
            .unwrap_or(0)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown channel '{s}' (expected web or whatsapp)"))
    }
}
