use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;

use crate::domain::pagination::ListFilter;
use crate::domain::pagination::PageNavigation;

const JSON: &str = "application/json";

/// Links keyed by relation name (`self`, `next`, `update`, ...).
pub type Links = BTreeMap<&'static str, Link>;

/// Hypermedia link attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub method: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<&'static str>,
}

/// Accumulates links whose hrefs are resolved against a base URL.
///
/// An empty base URL yields relative hrefs.
#[derive(Debug)]
pub struct HateoasBuilder<'a> {
    base_url: &'a str,
    links: Links,
}

impl<'a> HateoasBuilder<'a> {
    pub fn new(base_url: &'a str) -> Self {
        Self {
            base_url,
            links: Links::new(),
        }
    }

    pub fn get(self, rel: &'static str, path: &str) -> Self {
        self.add(rel, "GET", None, path)
    }

    pub fn patch(self, rel: &'static str, path: &str) -> Self {
        self.add(rel, "PATCH", Some(JSON), path)
    }

    pub fn delete(self, rel: &'static str, path: &str) -> Self {
        self.add(rel, "DELETE", None, path)
    }

    pub fn build(self) -> Links {
        self.links
    }

    fn add(
        mut self,
        rel: &'static str,
        method: &'static str,
        media_type: Option<&'static str>,
        path: &str,
    ) -> Self {
        self.links.insert(
            rel,
            Link {
                href: format!("{}{}", self.base_url, path),
                method,
                media_type,
            },
        );
        self
    }
}

/// `self`, `update` and `delete` links of a single resource.
///
/// `collection` is the public path segment, e.g. `categories`; mutations
/// live under `/admin`.
pub fn resource_links(base_url: &str, collection: &str, id: impl Display) -> Links {
    let path = format!("/{}/{}", collection, id);

    HateoasBuilder::new(base_url)
        .get("self", &path)
        .patch("update", &format!("/admin{}", path))
        .delete("delete", &format!("/admin{}", path))
        .build()
}

/// Navigation links of one listing page.
///
/// Every href repeats `limit` and the active filter so following a link
/// keeps the same window and filter.
pub fn pagination_links(
    base_url: &str,
    path: &str,
    navigation: &PageNavigation,
    filter: &ListFilter,
) -> Links {
    let suffix = filter.to_query_suffix();
    let href = |page: i64| {
        format!(
            "{}?page={}&limit={}{}",
            path, page, navigation.limit, suffix
        )
    };

    let mut builder = HateoasBuilder::new(base_url).get("self", &href(navigation.page));
    if navigation.has_last {
        builder = builder.get("last", &href(navigation.total_pages));
    }
    if navigation.has_next {
        builder = builder.get("next", &href(navigation.page.saturating_add(1)));
    }
    if navigation.has_prev {
        builder = builder.get("prev", &href(navigation.page - 1));
    }
    builder.build()
}

/// `_meta` of a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinksMeta {
    #[serde(rename = "_links")]
    pub links: Links,
}

/// `_meta` of a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub results: usize,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl PaginationMeta {
    pub fn new(navigation: &PageNavigation, results: usize, links: Links) -> Self {
        Self {
            page: navigation.page,
            limit: navigation.limit,
            total_pages: navigation.total_pages,
            results,
            links,
        }
    }
}
