use crate::model::{AuthorCount, CommitRecord};
use std::collections::HashMap;

/// The `top_n` most frequent authors, by exact author string.
///
/// Counts descend; authors with equal counts keep the order in which they
/// first appear in `records`.
pub fn top_authors<'a, I>(records: I, top_n: usize) -> Vec<AuthorCount>
where
    I: IntoIterator<Item = &'a CommitRecord>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<AuthorCount> = Vec::new();

    for record in records {
        match index.get(record.author.as_str()) {
            Some(&i) => counts[i].commit_count += 1,
            None => {
                index.insert(record.author.as_str(), counts.len());
                counts.push(AuthorCount {
                    author: record.author.clone(),
                    commit_count: 1,
                });
            }
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.commit_count.cmp(&a.commit_count));
    counts.truncate(top_n);
    counts
}
