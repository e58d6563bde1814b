use serde::Deserialize;
use std::path::Path;

/// Station list shipped with the player.
const BUILTIN_STATIONS: &str = include_str!("../stations.toml");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Station {
    pub name: String,
    pub url: String,
    /// Dial label shown before the name, e.g. "107.7".
    pub freq: Option<String>,
}

impl Station {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            freq: None,
        }
    }

    /// Name with the dial label in front when there is one.
    pub fn display_name(&self) -> String {
        match &self.freq {
            Some(freq) => format!("{} {}", freq, self.name),
            None => self.name.clone(),
        }
    }
}

/// Matches the TOML `[[station]]` table.
#[derive(Debug, Deserialize)]
struct TomlStationFile {
    #[serde(default)]
    station: Vec<TomlStation>,
}

#[derive(Debug, Deserialize)]
struct TomlStation {
    name: String,
    url: String,
    #[serde(default)]
    freq: Option<String>,
}

pub fn parse_stations_from_toml_str(content: &str) -> anyhow::Result<Vec<Station>> {
    let file: TomlStationFile = toml::from_str(content)?;
    let stations = file
        .station
        .into_iter()
        .map(|s| Station {
            name: s.name.trim().to_string(),
            url: s.url.trim().to_string(),
            freq: s.freq.filter(|f| !f.trim().is_empty()),
        })
        .collect();
    Ok(stations)
}

pub fn load_stations_from_toml(path: &Path) -> anyhow::Result<Vec<Station>> {
    let content = std::fs::read_to_string(path)?;
    parse_stations_from_toml_str(&content)
}

/// Parse an extended M3U playlist.
///
/// An `#EXTINF` line names the URL line that follows it; a URL without one is
/// named after itself. Other directives are skipped.
pub fn parse_m3u_from_str(content: &str) -> Vec<Station> {
    let mut title: Option<String> = None;
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match line.strip_prefix('#') {
            Some(directive) => {
                if let Some((_, name)) = directive
                    .strip_prefix("EXTINF:")
                    .and_then(|info| info.split_once(','))
                {
                    title = Some(name.trim().to_string()).filter(|n| !n.is_empty());
                }
                None
            }
            None => {
                let name = title.take().unwrap_or_else(|| line.to_string());
                Some(Station::new(name, line))
            }
        })
        .collect()
}

pub fn load_stations_from_m3u(path: &Path) -> anyhow::Result<Vec<Station>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_m3u_from_str(&content))
}

pub fn builtin_stations() -> Vec<Station> {
    // The file is compiled in and covered by tests.
    parse_stations_from_toml_str(BUILTIN_STATIONS).unwrap_or_default()
}

/// Resolve the station list: TOML file, then M3U file, then the built-in list.
pub fn load_stations(toml_path: &Path, m3u_path: Option<&Path>) -> anyhow::Result<Vec<Station>> {
    if toml_path.exists() {
        let stations = load_stations_from_toml(toml_path)?;
        tracing::info!("loaded {} stations from {:?}", stations.len(), toml_path);
        return Ok(stations);
    }

    if let Some(m3u) = m3u_path.filter(|p| p.exists()) {
        let stations = load_stations_from_m3u(m3u)?;
        tracing::info!("loaded {} stations from {:?}", stations.len(), m3u);
        return Ok(stations);
    }

    let stations = builtin_stations();
    tracing::info!("no station file found, using {} built-in stations", stations.len());
    Ok(stations)
}
