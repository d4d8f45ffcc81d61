//! Fixed option lists of the filter widgets.

use super::context::ChannelId;

/// Sales channels known to the platform
pub const CHANNELS: [(ChannelId, &str); 6] = [
    (1, "Presencial"),
    (2, "iFood"),
    (3, "Rappi"),
    (4, "Uber Eats"),
    (5, "WhatsApp"),
    (6, "App Próprio"),
];

/// Preset hour window of the "Período do Dia" select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourPreset {
    pub start: u8,
    pub end: u8,
    pub label: &'static str,
}

pub const HOUR_PRESETS: [HourPreset; 4] = [
    HourPreset {
        start: 6,
        end: 12,
        label: "Manhã (6h-12h)",
    },
    HourPreset {
        start: 12,
        end: 18,
        label: "Tarde (12h-18h)",
    },
    HourPreset {
        start: 18,
        end: 23,
        label: "Noite (18h-23h)",
    },
    HourPreset {
        start: 0,
        end: 6,
        label: "Madrugada (0h-6h)",
    },
];

/// Quick ranges of the date widget, in days back from today
pub const QUICK_RANGES: [(u32, &str); 3] = [
    (15, "Últimos 15 dias"),
    (30, "Últimos 30 dias"),
    (90, "Últimos 90 dias"),
];

pub fn channel_name(id: ChannelId) -> Option<&'static str> {
    CHANNELS
        .iter()
        .find(|(channel_id, _)| *channel_id == id)
        .map(|(_, name)| *name)
}

/// Label for an hour window: the preset label, or "19h-20h" for any other window
pub fn hour_label(start: u8, end: u8) -> String {
    HOUR_PRESETS
        .iter()
        .find(|preset| preset.start == start && preset.end == end)
        .map(|preset| preset.label.to_string())
        .unwrap_or_else(|| format!("{}h-{}h", start, end))
}

/// Select value encoding of an hour window: "start-end"
pub fn hour_value(start: u8, end: u8) -> String {
    format!("{}-{}", start, end)
}

pub fn parse_hour_value(value: &str) -> Option<(u8, u8)> {
    let (start, end) = value.split_once('-')?;
    Some((start.trim().parse().ok()?, end.trim().parse().ok()?))
}
