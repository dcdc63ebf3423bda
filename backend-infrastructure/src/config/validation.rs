use anyhow::{anyhow, Result};

pub fn validate_timezone(value: &str) -> Result<()> {
    value
        .parse::<chrono_tz::Tz>()
        .map(|_| ())
        .map_err(|_| anyhow!("unknown timezone '{}'", value))
}

pub fn validate_worksheet_title(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("worksheet title is empty"));
    }
    if value.contains(['[', ']', '*', '?', ':', '\\', '/']) {
        return Err(anyhow!("worksheet title contains reserved characters"));
    }
    Ok(())
}
