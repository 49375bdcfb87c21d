/// Default chat post limit, a little under the 2000 char hard cap
pub const DEFAULT_MAX_POST_LEN: usize = 1990;

/// Pack table lines into posts that stay under `max_post_len`.
///
/// Each line costs its char count plus a newline. The first post starts
/// with `first_post_reserved` chars already spent (the site link header).
/// A post is never left empty: a single line longer than the limit gets a
/// post of its own.
pub fn split_into_posts(text: &str, max_post_len: usize, first_post_reserved: usize) -> Vec<Vec<String>> {
    let mut posts: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = first_post_reserved;

    for line in text.lines() {
        let line_len = line.chars().count() + 1;
        if !current.is_empty() && current_len + line_len >= max_post_len {
            posts.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push(line.to_string());
        current_len += line_len;
    }

    if !current.is_empty() {
        posts.push(current);
    }
    posts
}

/// Render one post body: code-fenced lines, with the site link on the first post.
pub fn render_post(index: usize, lines: &[String], site_url: Option<&str>) -> String {
    let body = format!("```\n{}\n```", lines.join("\n"));
    match site_url {
        Some(url) if index == 0 => format!("{}\n{}", url, body),
        _ => body,
    }
}

/// Split and render a table into ready-to-send post bodies.
pub fn build_posts(table: &str, max_post_len: usize, site_url: Option<&str>) -> Vec<String> {
    let reserved = site_url.map(|url| url.chars().count()).unwrap_or(0);
    split_into_posts(table, max_post_len, reserved)
        .iter()
        .enumerate()
        .map(|(idx, lines)| render_post(idx, lines, site_url))
        .collect()
}
