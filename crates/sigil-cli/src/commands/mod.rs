pub mod dispatch;
pub mod instantiate;
pub mod list;
pub mod schema;
pub mod show;

/// Split `group/name` at the last `/`; a bare name addresses a root entry.
pub fn parse_key(key: &str) -> (Option<&str>, &str) {
    key.rsplit_once('/')
        .map_or((None, key), |(group, name)| (Some(group), name))
}
