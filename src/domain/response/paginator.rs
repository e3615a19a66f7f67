//! Pagination collaborator producing the `{items, total, page, per_page}` shape

use indexmap::IndexMap;

use crate::domain::response::payload::Payload;

pub const DEFAULT_PER_PAGE: usize = 25;

/// Wraps a list of items with pagination metadata.
///
/// With no caller-supplied `total`, the source list is treated as the full
/// result set: `total` is its length and the items are sliced to the
/// requested window. A caller-supplied `total` marks the list as already
/// windowed, so it is kept verbatim.
#[derive(Debug)]
pub struct Paginator {
    items: Vec<Payload>,
    total: usize,
    page: usize,
    per_page: usize,
}

impl Paginator {
    pub fn new(
        items: Vec<Payload>,
        total: Option<usize>,
        page: Option<usize>,
        per_page: Option<usize>,
        default_per_page: usize,
    ) -> Self {
        let per_page = per_page.unwrap_or(default_per_page).max(1);
        let page = page.unwrap_or(1).max(1);
        match total {
            Some(total) => Self {
                items,
                total,
                page,
                per_page,
            },
            None => {
                let total = items.len();
                let start = (page - 1).saturating_mul(per_page).min(total);
                let end = start.saturating_add(per_page).min(total);
                let items = items
                    .into_iter()
                    .skip(start)
                    .take(end - start)
                    .collect();
                Self {
                    items,
                    total,
                    page,
                    per_page,
                }
            }
        }
    }

    pub fn into_payload(self) -> Payload {
        let mut map = IndexMap::new();
        map.insert("items".to_string(), Payload::List(self.items));
        map.insert("total".to_string(), Payload::from(self.total));
        map.insert("page".to_string(), Payload::from(self.page));
        map.insert("per_page".to_string(), Payload::from(self.per_page));
        Payload::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Vec<Payload> {
        (0..count).map(Payload::from).collect()
    }

    fn items_len(payload: &Payload) -> usize {
        let Payload::Map(map) = payload else {
            panic!("expected a map payload");
        };
        let Payload::List(items) = &map["items"] else {
            panic!("expected an items list");
        };
        items.len()
    }

    #[test]
    fn slices_the_window_when_total_is_implicit() {
        let paginator = Paginator::new(numbered(10), None, Some(2), Some(3), DEFAULT_PER_PAGE);
        let payload = paginator.into_payload();
        assert_eq!(items_len(&payload), 3);
        let Payload::Map(map) = &payload else {
            unreachable!()
        };
        assert!(matches!(&map["total"], Payload::Number(n) if n.as_u64() == Some(10)));
        assert!(matches!(&map["page"], Payload::Number(n) if n.as_u64() == Some(2)));
        assert!(matches!(&map["per_page"], Payload::Number(n) if n.as_u64() == Some(3)));
    }

    #[test]
    fn keeps_pre_windowed_items_when_total_is_supplied() {
        let paginator = Paginator::new(numbered(3), Some(50), Some(4), Some(3), DEFAULT_PER_PAGE);
        let payload = paginator.into_payload();
        assert_eq!(items_len(&payload), 3);
        let Payload::Map(map) = &payload else {
            unreachable!()
        };
        assert!(matches!(&map["total"], Payload::Number(n) if n.as_u64() == Some(50)));
    }

    #[test]
    fn defaults_apply_when_metadata_is_missing() {
        let paginator = Paginator::new(numbered(30), None, None, None, DEFAULT_PER_PAGE);
        let payload = paginator.into_payload();
        assert_eq!(items_len(&payload), DEFAULT_PER_PAGE);
        let Payload::Map(map) = &payload else {
            unreachable!()
        };
        assert!(matches!(&map["page"], Payload::Number(n) if n.as_u64() == Some(1)));
    }

    #[test]
    fn out_of_range_pages_yield_empty_windows() {
        let paginator = Paginator::new(numbered(4), None, Some(9), Some(10), DEFAULT_PER_PAGE);
        assert_eq!(items_len(&paginator.into_payload()), 0);
    }
}
