/// Name of the per-challenge readme file.
pub const README_FILE: &str = "README.md";

const FALLBACK_NAME: &str = "untitled";

/// Filesystem-safe directory name for a challenge title.
///
/// Keeps alphanumerics, `-`, `_` and spaces, drops everything else, then
/// collapses runs of spaces. Applying it twice yields the same result.
pub fn sanitize_name(title: &str) -> String {
    let mut cleaned = String::with_capacity(title.len());
    let mut prev_space = false;
    for c in title.chars().filter(|c| is_kept(*c)) {
        if c == ' ' {
            if !prev_space {
                cleaned.push(c);
            }
            prev_space = true;
        } else {
            cleaned.push(c);
            prev_space = false;
        }
    }
    if cleaned.trim().is_empty() {
        return FALLBACK_NAME.to_string();
    }
    cleaned
}

fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | ' ')
}

/// File name for the solution at `index` (0-based) out of `total` unique ones.
///
/// A lone solution is `Solution.<ext>`; several are numbered from 1.
pub fn solution_filename(index: usize, total: usize, extension: &str) -> String {
    if total > 1 {
        format!("Solution {}.{extension}", index + 1)
    } else {
        format!("Solution.{extension}")
    }
}

/// Single-line readme linking back to the challenge page.
pub fn readme_contents(title: &str, base_url: &str, relative_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!("# [{title}]({base}{relative_url})\n")
}
