//! Path queries over parsed documents.
//!
//! JSON documents use dotted paths (`http.port`, `servers.0.host`,
//! `servers.#`, `servers.#.host`). YAML documents use `$`-rooted paths
//! (`$.http.port`, `$.servers[0]`, `$.servers[*].host`, `$..port`).

mod json;
mod yaml;

#[cfg(test)]
mod tests;

pub(crate) use json::query_json;
pub(crate) use yaml::query_yaml;
