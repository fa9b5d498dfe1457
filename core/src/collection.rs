use crate::document::Recipe;
use crate::error::BuildError;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Read a `.json` (array or single object) or `.jsonl` (one recipe per line) file.
pub fn read_collection_file(path: &Path) -> Result<Vec<Recipe>, BuildError> {
    let f = File::open(path).map_err(|source| BuildError::Io { path: path.to_path_buf(), source })?;
    let reader = BufReader::new(f);
    if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        read_jsonl(reader, path)
    } else {
        read_json(reader, path)
    }
}

pub fn read_json<R: Read>(reader: R, path: &Path) -> Result<Vec<Recipe>, BuildError> {
    let parse_err = |source| BuildError::Parse { path: path.to_path_buf(), line: None, source };
    let json: serde_json::Value = serde_json::from_reader(reader).map_err(parse_err)?;
    match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(parse_err))
            .collect(),
        serde_json::Value::Object(_) => Ok(vec![serde_json::from_value(json).map_err(parse_err)?]),
        _ => Err(BuildError::InvalidShape { path: path.to_path_buf() }),
    }
}

pub fn read_jsonl<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Recipe>, BuildError> {
    let mut recipes = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| BuildError::Io { path: path.to_path_buf(), source })?;
        if line.trim().is_empty() { continue; }
        let recipe = serde_json::from_str(&line)
            .map_err(|source| BuildError::Parse { path: path.to_path_buf(), line: Some(i + 1), source })?;
        recipes.push(recipe);
    }
    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_array_and_single_object() {
        let p = Path::new("recipes.json");
        let arr = read_json(r#"[{"title": "A"}, {"title": "B", "calories": 10}]"#.as_bytes(), p).unwrap();
        assert_eq!(arr.len(), 2);
        let one = read_json(r#"{"title": "Solo"}"#.as_bytes(), p).unwrap();
        assert_eq!(one[0].title, "Solo");
    }

    #[test]
    fn scalar_root_is_invalid() {
        let err = read_json("42".as_bytes(), Path::new("x.json")).unwrap_err();
        assert!(matches!(err, BuildError::InvalidShape { .. }));
    }

    #[test]
    fn record_without_title_fails() {
        let err = read_json(r#"[{"title": "A"}, {"desc": "untitled"}]"#.as_bytes(), Path::new("x.json")).unwrap_err();
        assert!(matches!(err, BuildError::Parse { line: None, .. }));
    }

    #[test]
    fn jsonl_reports_line_numbers() {
        let input = "{\"title\": \"A\"}\n\n{\"title\": \n";
        let err = read_jsonl(input.as_bytes(), Path::new("x.jsonl")).unwrap_err();
        assert!(matches!(err, BuildError::Parse { line: Some(3), .. }));
    }

    #[test]
    fn jsonl_skips_blank_lines() {
        let input = "{\"title\": \"A\"}\n   \n{\"title\": \"B\"}\n";
        let recipes = read_jsonl(input.as_bytes(), Path::new("x.jsonl")).unwrap();
        assert_eq!(recipes.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
