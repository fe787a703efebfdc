use std::fmt::Write;

/// Joins names into an English list, keeping the order they're given in. Pass a `BTreeSet` for
/// sorted, deduplicated output.
pub fn plain_list_names<I: IntoIterator<Item = String>>(names: I) -> String {
    let names: Vec<String> = names.into_iter().collect();
    let mut s = String::new();
    let len = names.len();
    for (idx, n) in names.into_iter().enumerate() {
        if idx != 0 {
            if idx == len - 1 {
                if len == 2 {
                    write!(s, " and ").unwrap();
                } else {
                    write!(s, ", and ").unwrap();
                }
            } else {
                write!(s, ", ").unwrap();
            }
        }
        write!(s, "{}", n).unwrap();
    }
    s
}

pub fn prettyprint_usize(x: usize) -> String {
    let num = format!("{}", x);
    let mut result = String::new();
    let mut i = num.len();
    for c in num.chars() {
        result.push(c);
        i -= 1;
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
    }
    result
}

/// Strips the directory and the last extension. "maps/town01.xodr" becomes "town01". Returns the
/// input unchanged if there's no file stem.
pub fn basename<I: AsRef<str>>(path: I) -> String {
    std::path::Path::new(path.as_ref())
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.as_ref().to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_prettyprint_usize() {
        assert_eq!(prettyprint_usize(0), "0");
        assert_eq!(prettyprint_usize(999), "999");
        assert_eq!(prettyprint_usize(1000), "1,000");
        assert_eq!(prettyprint_usize(1234567), "1,234,567");
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("maps/town01.xodr"), "town01");
        assert_eq!(basename("town01"), "town01");
        // Double basename strips both extensions
        assert_eq!(basename(basename("a/b/town.net.xml")), "town");
    }

    #[test]
    fn test_plain_list_names() {
        let names: BTreeSet<String> = vec!["a", "b", "c"]
            .into_iter()
            .map(|x| x.to_string())
            .collect();
        assert_eq!(plain_list_names(names), "a, b, and c");

        let ids = vec!["2".to_string(), "10".to_string()];
        assert_eq!(plain_list_names(ids), "2 and 10");
        assert_eq!(plain_list_names(vec!["7".to_string()]), "7");
    }
}
