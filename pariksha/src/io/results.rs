//! BOP19 CSV result loading.
//!
//! Each line holds one estimate:
//!
//! ```text
//! scene_id,im_id,obj_id,score,R,t,time
//! 48,1,2,0.87,1 0 0 0 1 0 0 0 1,-3.1 22.5 810.0,0.42
//! ```
//!
//! `R` is a row-major 3x3 rotation and `t` a translation, both
//! space-separated. The header line is optional.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::core::Estimate;
use crate::error::{EvalError, Result};

/// Header of the BOP19 result format.
pub const BOP19_HEADER: &str = "scene_id,im_id,obj_id,score,R,t,time";

/// Load all estimates of a BOP19 result file, in file order.
pub fn load_bop_results(path: &Path) -> Result<Vec<Estimate>> {
    let file = File::open(path)?;
    read_bop_results(BufReader::new(file), path)
}

/// Parse BOP19 results from any reader; `path` is only used in errors.
pub fn read_bop_results<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Estimate>> {
    let mut estimates = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;

        if line_no == 1 && line.contains(BOP19_HEADER) {
            continue;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let estimate = parse_line(line).map_err(|reason| EvalError::ResultFormat {
            path: path.to_path_buf(),
            line: line_no,
            reason,
        })?;
        estimates.push(estimate);
    }

    Ok(estimates)
}

fn parse_line(line: &str) -> std::result::Result<Estimate, String> {
    let elems: Vec<&str> = line.split(',').collect();
    if elems.len() != 7 {
        return Err(format!("expected 7 fields, found {}", elems.len()));
    }

    let time: f64 = parse_field(elems[6], "time")?;
    if time.is_nan() {
        return Err("time is NaN (use -1 when not reported)".to_string());
    }

    Ok(Estimate {
        scene_id: parse_field(elems[0], "scene_id")?,
        im_id: parse_field(elems[1], "im_id")?,
        obj_id: parse_field(elems[2], "obj_id")?,
        score: parse_field(elems[3], "score")?,
        rotation: parse_vector::<9>(elems[4], "R")?,
        translation: parse_vector::<3>(elems[5], "t")?,
        time,
    })
}

fn parse_field<T: FromStr>(value: &str, name: &str) -> std::result::Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid {} '{}'", name, value.trim()))
}

fn parse_vector<const N: usize>(value: &str, name: &str) -> std::result::Result<[f64; N], String> {
    let values = value
        .split_whitespace()
        .map(|v| parse_field::<f64>(v, name))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    <[f64; N]>::try_from(values.as_slice())
        .map_err(|_| format!("{} needs {} values, found {}", name, N, values.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    const IDENTITY: &str = "1 0 0 0 1 0 0 0 1";

    fn parse(text: &str) -> Result<Vec<Estimate>> {
        read_bop_results(Cursor::new(text), Path::new("test.csv"))
    }

    #[test]
    fn test_parse_with_header() {
        let text = format!(
            "{}\n48,1,2,0.87,{},-3.1 22.5 810.0,0.42\n48,1,5,0.5,{},0 0 500,0.42\n",
            BOP19_HEADER, IDENTITY, IDENTITY
        );
        let ests = parse(&text).unwrap();
        assert_eq!(ests.len(), 2);
        assert_eq!(ests[0].scene_id, 48);
        assert_eq!(ests[0].obj_id, 2);
        assert_eq!(ests[0].translation, [-3.1, 22.5, 810.0]);
        assert_eq!(ests[0].rotation[4], 1.0);
        assert_eq!(ests[1].obj_id, 5);
        assert_eq!(ests[1].time, 0.42);
    }

    #[test]
    fn test_parse_without_header_and_blank_lines() {
        let text = format!("1,2,3,1.0,{},0 0 1,-1\n\n", IDENTITY);
        let ests = parse(&text).unwrap();
        assert_eq!(ests.len(), 1);
        assert!(!ests[0].has_time());
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let text = format!("{}\n1,2,3,1.0,{},0 0 1\n", BOP19_HEADER, IDENTITY);
        match parse(&text) {
            Err(EvalError::ResultFormat { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("7 fields"));
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_short_rotation_is_rejected() {
        let text = "1,2,3,1.0,1 0 0,0 0 1,0.1\n";
        assert!(matches!(
            parse(text),
            Err(EvalError::ResultFormat { line: 1, .. })
        ));
    }

    #[test]
    fn test_nan_time_is_rejected() {
        let text = format!(
            "{}\n1,2,3,1.0,{},0 0 1,0.5\n1,2,4,1.0,{},0 0 1,NaN\n",
            BOP19_HEADER, IDENTITY, IDENTITY
        );
        match parse(&text) {
            Err(EvalError::ResultFormat { line, reason, .. }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("NaN"));
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("m_ycbv-test.csv");
        std::fs::write(&path, format!("7,9,1,0.3,{},1 2 3,0.25\n", IDENTITY)).unwrap();

        let ests = load_bop_results(&path).unwrap();
        assert_eq!(ests.len(), 1);
        assert_eq!(ests[0].key().to_string(), "000007_000009");
    }
}
