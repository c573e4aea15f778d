use crate::HarvestError;
use std::path::Path;

/// Parses a seed list
///
/// One URL per line. Blank lines and lines starting with `#` are ignored;
/// surrounding whitespace is trimmed. URLs are not validated here, the
/// crawler rejects malformed seeds individually.
pub fn parse_seed_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Loads seed URLs from a line-oriented text file
///
/// # Returns
///
/// * `Ok(Vec<String>)` - At least one seed
/// * `Err(HarvestError::SeedFile)` - The file could not be read
/// * `Err(HarvestError::NoSeeds)` - The file holds no seed lines
pub fn load_seed_urls(path: &Path) -> Result<Vec<String>, HarvestError> {
    let content = std::fs::read_to_string(path).map_err(|source| HarvestError::SeedFile {
        path: path.to_path_buf(),
        source,
    })?;

    let seeds = parse_seed_list(&content);
    if seeds.is_empty() {
        return Err(HarvestError::NoSeeds(path.to_path_buf()));
    }

    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_seed_list_skips_comments_and_blanks() {
        let content = "# docs sites\nhttps://a.example/\n\n   \n  https://b.example/start  \n#https://skipped.example/\n";
        assert_eq!(
            parse_seed_list(content),
            vec!["https://a.example/", "https://b.example/start"]
        );
    }

    #[test]
    fn test_load_seed_urls() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "https://a.example/").unwrap();
        writeln!(file, "# comment").unwrap();

        let seeds = load_seed_urls(file.path()).unwrap();
        assert_eq!(seeds, vec!["https://a.example/"]);
    }

    #[test]
    fn test_missing_seed_file() {
        let result = load_seed_urls(Path::new("/nonexistent/base_urls.txt"));
        assert!(matches!(result, Err(HarvestError::SeedFile { .. })));
    }

    #[test]
    fn test_seed_file_without_seeds() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# nothing yet").unwrap();

        let result = load_seed_urls(file.path());
        assert!(matches!(result, Err(HarvestError::NoSeeds(_))));
    }
}
