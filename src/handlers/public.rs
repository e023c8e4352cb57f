use astra::Request;

use crate::app::App;
use crate::db::{listings, photos, ListingScope};
use crate::domain::compare::{comparison_rows, parse_compare_ids};
use crate::domain::listing::Listing;
use crate::domain::search::{apply, paginate, FilterOptions, ListingFilter, SortOrder, PER_PAGE};
use crate::domain::slug::{listing_path, listing_slug, parse_slug_id};
use crate::errors::ServerError;
use crate::requests::{self, FormData};
use crate::responses::{html_response, redirect_permanent, ResultResp};
use crate::templates::pages::{self, DetailVm, SearchVm};
use crate::templates::SiteInfo;

const HOME_HIGHLIGHTS: usize = 6;

fn published(app: &App) -> Result<Vec<Listing>, ServerError> {
    app.db
        .with_conn(|conn| listings::list_listings(conn, ListingScope::Published))
}

/// Featured listings, newest first; the newest overall when none is featured.
pub fn home_highlights(all: &[Listing]) -> Vec<&Listing> {
    let featured: Vec<&Listing> = all
        .iter()
        .filter(|l| l.featured)
        .take(HOME_HIGHLIGHTS)
        .collect();
    if featured.is_empty() {
        all.iter().take(HOME_HIGHLIGHTS).collect()
    } else {
        featured
    }
}

pub fn home(app: &App) -> ResultResp {
    let all = published(app)?;
    let options = FilterOptions::from_listings(&all);
    html_response(pages::home_page(
        SiteInfo::from_config(&app.config),
        &home_highlights(&all),
        &options.cities,
    ))
}

pub fn search(req: &Request, app: &App) -> ResultResp {
    let query = requests::query(req);
    let filter = ListingFilter::from_query(&query);
    let sort = query.text("ordem").map(SortOrder::parse).unwrap_or_default();
    let page = query
        .text("pagina")
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1);

    let all = published(app)?;
    let matching = apply(&all, &filter, sort);
    tracing::debug!(matches = matching.len(), ?sort, "listing search");

    let vm = SearchVm {
        filter,
        sort,
        options: FilterOptions::from_listings(&all),
        results: paginate(&matching, page, PER_PAGE),
        query,
    };
    html_response(pages::search_page(SiteInfo::from_config(&app.config), &vm))
}

pub fn detail(app: &App, slug: &str) -> ResultResp {
    let id = parse_slug_id(slug).ok_or(ServerError::NotFound)?;

    let (listing, photos) = app.db.with_conn(|conn| {
        let Some(listing) = listings::get_listing(conn, id)? else {
            return Ok((None, Vec::new()));
        };
        let photos = photos::list_photos(conn, id)?;
        Ok((Some(listing), photos))
    })?;

    let listing = listing
        .filter(|l| l.published)
        .ok_or(ServerError::NotFound)?;

    if slug != listing_slug(&listing) {
        return redirect_permanent(&listing_path(&listing));
    }

    app.db.with_conn(|conn| listings::increment_views(conn, id))?;

    let vm = DetailVm {
        listing: &listing,
        photos: &photos,
        form_values: FormData::default(),
        form_errors: Vec::new(),
    };
    html_response(pages::detail_page(SiteInfo::from_config(&app.config), &vm))
}

pub fn compare(req: &Request, app: &App) -> ResultResp {
    let ids = parse_compare_ids(&requests::query(req));

    let found: Vec<Listing> = app.db.with_conn(|conn| {
        let mut out = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(l) = listings::get_listing(conn, *id)? {
                if l.published {
                    out.push(l);
                }
            }
        }
        Ok(out)
    })?;

    let refs: Vec<&Listing> = found.iter().collect();
    let rows = comparison_rows(&refs);
    html_response(pages::compare_page(SiteInfo::from_config(&app.config), &refs, &rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::test_conn;
    use crate::db::listings::tests::sample_input;

    fn stored(titles_featured: &[(&str, bool)]) -> Vec<Listing> {
        let conn = test_conn();
        for (i, (title, featured)) in titles_featured.iter().enumerate() {
            let mut input = sample_input(title);
            input.featured = *featured;
            listings::insert_listing(&conn, &input, 1_000 + i as i64).unwrap();
        }
        listings::list_listings(&conn, ListingScope::Published).unwrap()
    }

    #[test]
    fn highlights_prefer_featured() {
        let all = stored(&[("A", false), ("B", true), ("C", false), ("D", true)]);
        let titles: Vec<&str> = home_highlights(&all).iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["D", "B"]);
    }

    #[test]
    fn highlights_fall_back_to_newest() {
        let names: Vec<String> = (0..8).map(|i| format!("L{i}")).collect();
        let rows: Vec<(&str, bool)> = names.iter().map(|n| (n.as_str(), false)).collect();
        let all = stored(&rows);
        let highlights = home_highlights(&all);
        assert_eq!(highlights.len(), HOME_HIGHLIGHTS);
        assert_eq!(highlights[0].title, "L7");
    }
}
