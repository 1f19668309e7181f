//! Functional edits of a topic list.
//!
//! A topic list is treated as an immutable ordered sequence: every edit
//! returns a new `Vec<Topic>` and leaves every untouched entry equal and in
//! place.

use thiserror::Error;

use crate::models::Topic;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopicEditError {
    #[error("topic index {index} is out of range (list has {len} topics)")]
    IndexOutOfRange { index: usize, len: usize },
}

fn check_index(topics: &[Topic], index: usize) -> Result<(), TopicEditError> {
    if index < topics.len() {
        Ok(())
    } else {
        Err(TopicEditError::IndexOutOfRange {
            index,
            len: topics.len(),
        })
    }
}

/// Replace the topic at `index` with `topic`.
pub fn replace_at(
    topics: &[Topic],
    index: usize,
    topic: Topic,
) -> Result<Vec<Topic>, TopicEditError> {
    update_at(topics, index, |_| topic)
}

/// Replace the topic at `index` with `f(old)`.
pub fn update_at<F>(topics: &[Topic], index: usize, f: F) -> Result<Vec<Topic>, TopicEditError>
where
    F: FnOnce(&Topic) -> Topic,
{
    check_index(topics, index)?;
    let replacement = f(&topics[index]);
    let mut updated = Vec::with_capacity(topics.len());
    updated.extend_from_slice(&topics[..index]);
    updated.push(replacement);
    updated.extend_from_slice(&topics[index + 1..]);
    Ok(updated)
}

/// Append `topic` to the end of the list.
pub fn insert(topics: &[Topic], topic: Topic) -> Vec<Topic> {
    topics.iter().cloned().chain(std::iter::once(topic)).collect()
}

/// Drop the topic at `index`.
pub fn remove_at(topics: &[Topic], index: usize) -> Result<Vec<Topic>, TopicEditError> {
    check_index(topics, index)?;
    Ok(topics
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, t)| t.clone())
        .collect())
}
