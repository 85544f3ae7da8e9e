/// Loading of rating tables and training sets from disk
use crate::error::{AppError, Result};
use collab_filter::{LabeledPoint, RatingTable, TrainingSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| AppError::File {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a JSON object of objects (`{"user": {"item": 4.5}}`)
pub fn load_ratings(path: &Path) -> Result<RatingTable> {
    let table = parse_ratings(open(path)?)?;

    debug!(
        path = %path.display(),
        entities = table.len(),
        "Loaded rating table"
    );

    Ok(table)
}

pub fn parse_ratings<R: Read>(reader: R) -> Result<RatingTable> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse whitespace-delimited training records.
///
/// Every column but the last is a numeric feature; the last column is the
/// label. Blank lines are skipped. All records must have the same number of
/// columns as the first one.
pub fn parse_training_set<R: BufRead>(reader: R) -> Result<TrainingSet<String>> {
    let mut points = Vec::new();
    let mut columns: Option<usize> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        if tokens.len() < 2 {
            return Err(AppError::parse(
                line_no,
                "expected at least one feature and a label",
            ));
        }

        match columns {
            Some(expected) if expected != tokens.len() => {
                return Err(AppError::parse(
                    line_no,
                    format!("expected {} columns, found {}", expected, tokens.len()),
                ));
            }
            Some(_) => {}
            None => columns = Some(tokens.len()),
        }

        let (label, raw_features) = match tokens.split_last() {
            Some((label, rest)) => (label.to_string(), rest),
            None => continue,
        };

        let features = raw_features
            .iter()
            .map(|raw| {
                raw.parse::<f64>()
                    .map_err(|e| AppError::parse(line_no, format!("invalid feature '{}': {}", raw, e)))
            })
            .collect::<Result<Vec<f64>>>()?;

        points.push(LabeledPoint::new(features, label));
    }

    Ok(TrainingSet::new(points)?)
}

pub fn load_training_set(path: &Path) -> Result<TrainingSet<String>> {
    let training = parse_training_set(open(path)?)?;

    debug!(
        path = %path.display(),
        records = training.len(),
        dimension = training.dimension(),
        "Loaded training set"
    );

    Ok(training)
}

/// Four-point, two-label set used when no training file is configured
pub fn sample_training_set() -> Result<TrainingSet<String>> {
    let points = vec![
        (vec![1.0, 1.1], "A".to_string()),
        (vec![1.0, 1.0], "A".to_string()),
        (vec![0.0, 0.0], "B".to_string()),
        (vec![0.0, 0.1], "B".to_string()),
    ];

    Ok(TrainingSet::try_from(points)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use collab_filter::CollabError;
    use std::io::{Cursor, Write};

    #[test]
    fn test_parse_training_set() {
        let data = "40920\t8.326976\t0.953952\t3\n\n14488  7.153469  1.673904  2\n26052 1.441871 0.805124 1\n";

        let training = parse_training_set(Cursor::new(data)).unwrap();

        assert_eq!(training.len(), 3);
        assert_eq!(training.dimension(), 3);
        assert_eq!(training.points()[0].features, vec![40920.0, 8.326976, 0.953952]);
        let labels: Vec<&str> = training.labels().map(String::as_str).collect();
        assert_eq!(labels, vec!["3", "2", "1"]);
    }

    #[test]
    fn test_parse_training_set_ragged_rows() {
        let data = "1.0 2.0 A\n1.0 B\n";
        let err = parse_training_set(Cursor::new(data)).unwrap_err();

        match err {
            AppError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert_eq!(message, "expected 3 columns, found 2");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_training_set_bad_number() {
        let data = "1.0 2.0 A\n1.0 two B\n";
        let err = parse_training_set(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, AppError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_training_set_label_only() {
        let err = parse_training_set(Cursor::new("A\n")).unwrap_err();
        assert!(matches!(err, AppError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_parse_training_set_empty() {
        let err = parse_training_set(Cursor::new("\n   \n")).unwrap_err();
        assert!(matches!(err, AppError::Core(CollabError::InvalidArgument(_))));
    }

    #[test]
    fn test_parse_ratings() {
        let table = parse_ratings(Cursor::new(r#"{"A": {"x": 5, "y": 3}, "B": {"x": 4}}"#)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.ratings("A").unwrap().get("x"), Some(&5.0));

        assert!(matches!(parse_ratings(Cursor::new("[1, 2]")), Err(AppError::Json(_))));
        assert!(matches!(
            parse_ratings(Cursor::new(r#"{"A": {"x": "five"}}"#)),
            Err(AppError::Json(_))
        ));
    }

    #[test]
    fn test_load_ratings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"A": {{"x": 0.5}}, "B": {{"x": 1.5, "y": 2.0}}}}"#).unwrap();

        let table = load_ratings(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.ratings("B").unwrap().get("y"), Some(&2.0));

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, "not json").unwrap();
        assert!(matches!(load_ratings(bad.path()), Err(AppError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_ratings(Path::new("/nonexistent/ratings.json")).unwrap_err();
        assert!(matches!(err, AppError::File { .. }));
    }

    #[test]
    fn test_sample_training_set() {
        let training = sample_training_set().unwrap();
        assert_eq!(training.len(), 4);
        assert_eq!(training.dimension(), 2);
    }
}
