// Saving the canvas to timestamped image files.
//
// The default template `drawing_%s` has one-second resolution, so two saves within
// the same second map to the same file and the later one overwrites the earlier.

use crate::canvas::Canvas;
use crate::config::OutputConfig;
use crate::error::Error;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

/// True when every specifier in `template` is one chrono understands.
pub fn template_is_valid(template: &str) -> bool {
    !StrftimeItems::new(template).any(|item| matches!(item, Item::Error))
}

/// Render `template` (chrono format specifiers) at the current local time.
pub fn generate_filename(template: &str, format: &str) -> Result<String, Error> {
    generate_filename_at(template, format, &Local::now())
}

/// Same as [`generate_filename`] for a fixed instant.
pub fn generate_filename_at<Tz>(template: &str, format: &str, at: &DateTime<Tz>) -> Result<String, Error>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut name = String::new();
    write!(name, "{}.{}", at.format(template), format)
        .map_err(|_| Error::FilenameTemplate { template: template.to_string() })?;
    Ok(name)
}

/// Create the directory if it isn't there yet.
pub fn ensure_directory_exists(directory: &Path) -> Result<(), Error> {
    if !directory.exists() {
        log::info!("Creating save directory: {}", directory.display());
        fs::create_dir_all(directory).map_err(|source| Error::CreateDir {
            path: directory.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Write the canvas under `config.save_directory` and return where it went.
pub fn save_canvas(canvas: &Canvas, config: &OutputConfig) -> Result<PathBuf, Error> {
    ensure_directory_exists(&config.save_directory)?;
    let filename = generate_filename(&config.filename_template, &config.format)?;
    let path = config.save_directory.join(filename);
    if path.exists() {
        log::warn!("Overwriting {}", path.display());
    }
    canvas.save(&path)?;
    log::info!("Canvas saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn default_template_uses_unix_seconds() {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(generate_filename_at("drawing_%s", "png", &at).unwrap(), "drawing_1700000000.png");
    }

    #[test]
    fn saves_in_the_same_second_share_a_name() {
        let a = Utc.timestamp_opt(1_700_000_000, 100_000_000).unwrap();
        let b = Utc.timestamp_opt(1_700_000_000, 900_000_000).unwrap();
        assert_eq!(
            generate_filename_at("drawing_%s", "png", &a).unwrap(),
            generate_filename_at("drawing_%s", "png", &b).unwrap()
        );
    }

    #[test]
    fn save_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = OutputConfig {
            save_directory: dir.path().join("sketches"),
            filename_template: "test_%Y%m%d_%H%M%S".to_string(),
            format: "png".to_string(),
        };
        let canvas = Canvas::new(8, 8, 1);

        let path = save_canvas(&canvas, &config).unwrap();
        assert!(path.exists());
        assert!(path.starts_with(dir.path().join("sketches")));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
    }

    #[test]
    fn second_save_in_same_second_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let config = OutputConfig {
            save_directory: dir.path().to_path_buf(),
            // No time fields: every save lands on the same name.
            filename_template: "fixed".to_string(),
            format: "png".to_string(),
        };
        let canvas = Canvas::new(8, 8, 1);
        let first = save_canvas(&canvas, &config).unwrap();
        let second = save_canvas(&canvas, &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn unknown_specifier_is_an_error_not_a_crash() {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert!(!template_is_valid("drawing_%Q"));
        assert!(template_is_valid("drawing_%s"));
        assert!(matches!(
            generate_filename_at("drawing_%Q", "png", &at),
            Err(Error::FilenameTemplate { .. })
        ));

        let dir = tempfile::tempdir().unwrap();
        let config = OutputConfig {
            save_directory: dir.path().to_path_buf(),
            filename_template: "drawing_%Q".to_string(),
            format: "png".to_string(),
        };
        let err = save_canvas(&Canvas::new(8, 8, 1), &config).unwrap_err();
        assert!(matches!(err, Error::FilenameTemplate { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
