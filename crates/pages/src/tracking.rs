// ABOUTME: Detects marketing and analytics tracking tags in raw page HTML.
// ABOUTME: Each match is classified by origin: injected through GTM, by a plugin, or hardcoded.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static DETECTORS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("Google Tag Manager", r"(GTM-[A-Z0-9]+)"),
        ("Google Analytics 4 (GA4)", r"(G-[A-Z0-9]+)"),
        ("Google Analytics (UA)", r"(UA-\d{4,10}-\d+)"),
        ("Meta Pixel", r#"fbq\('init',\s*['"]?(\d+)['"]?\)"#),
        ("TikTok Pixel", r#"ttq\.load\(['"]?(\d+)['"]?\)"#),
        ("LinkedIn Insight Tag", r"linkedin\.com/li\.js"),
        ("Twitter Pixel", r"static\.ads-twitter\.com"),
        ("Google Ads Remarketing", r"AW-(\d+)"),
        (
            "Google Search Console",
            r#"google-site-verification["']?\s*content=["'](.*?)['"]"#,
        ),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).unwrap()))
    .collect()
});

static DATALAYER_PUSH: Lazy<Regex> = Lazy::new(|| Regex::new(r"dataLayer\.push\((.*?)\)").unwrap());

const SAMPLE_EVENTS: usize = 3;

/// Where a tracking snippet most likely came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Origin {
    Gtm,
    Plugin,
    Hardcoded,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Origin::Gtm => "GTM",
            Origin::Plugin => "Plugin",
            Origin::Hardcoded => "Hardcoded",
        };
        write!(f, "{}", s)
    }
}

/// One matched identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerMatch {
    pub id: String,
    pub origin: Origin,
}

/// All matches of one detector; empty when the tracker is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerHit {
    pub name: String,
    pub matches: Vec<TrackerMatch>,
}

impl TrackerHit {
    pub fn found(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Result of scanning one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingReport {
    pub url: String,
    pub trackers: Vec<TrackerHit>,
    pub event_pushes: usize,
    pub sample_events: Vec<String>,
}

impl TrackingReport {
    pub fn tracker(&self, name: &str) -> Option<&TrackerHit> {
        self.trackers.iter().find(|t| t.name == name)
    }
}

/// Prefix `https://` when `target` has no http(s) scheme.
pub fn normalize_target(target: &str) -> String {
    let target = target.trim();
    if target.starts_with("http") {
        target.to_string()
    } else {
        format!("https://{}", target)
    }
}

/// Classify the HTML line a match was found on.
pub fn detect_origin(line: &str) -> Origin {
    if line.contains("googletagmanager") {
        Origin::Gtm
    } else if line.contains("plugin") {
        Origin::Plugin
    } else {
        Origin::Hardcoded
    }
}

/// Run every detector over `html`.
pub fn scan_tracking(url: &str, html: &str) -> TrackingReport {
    let trackers = DETECTORS
        .iter()
        .map(|(name, re)| {
            let matches = re
                .captures_iter(html)
                .map(|caps| {
                    let id = caps
                        .get(1)
                        .or_else(|| caps.get(0))
                        .map(|m| m.as_str())
                        .unwrap_or_default();
                    let line = html.lines().find(|l| l.contains(id)).unwrap_or_default();
                    TrackerMatch {
                        id: id.to_string(),
                        origin: detect_origin(line),
                    }
                })
                .collect();
            TrackerHit {
                name: name.to_string(),
                matches,
            }
        })
        .collect();

    let events: Vec<&str> = DATALAYER_PUSH
        .captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    TrackingReport {
        url: url.to_string(),
        trackers,
        event_pushes: events.len(),
        sample_events: events
            .iter()
            .take(SAMPLE_EVENTS)
            .map(|e| e.to_string())
            .collect(),
    }
}
