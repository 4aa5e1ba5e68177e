/// Keep only the records tagged with `topic`.
///
/// With no topic configured this is the identity: elements and order are
/// preserved. With a topic, a record survives when its topic set contains the
/// selector exactly (case-sensitive, whole-tag match).
pub fn filter_by_topic<T, F>(topic: Option<&str>, records: Vec<T>, topics_of: F) -> Vec<T>
where
    F: Fn(&T) -> &[String],
{
    match topic {
        None => records,
        Some(topic) => records
            .into_iter()
            .filter(|record| topics_of(record).iter().any(|t| t == topic))
            .collect(),
    }
}
