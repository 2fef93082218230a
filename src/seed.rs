//! Sample catalog used to bootstrap a fresh database.
//!
//! Seeding goes through the two get-or-create operations, so running it
//! repeatedly never duplicates rows. Existing pages get their URL and view
//! count refreshed from the table below; existing categories are left as is.

use crate::domain::category::Category;
use crate::domain::page::Page;
use crate::domain::types::{CategoryName, PageTitle, PageUrl, ViewCount};
use crate::repository::{CategoryWriter, PageWriter, RepositoryResult};

struct SeedPage {
    title: &'static str,
    url: &'static str,
    views: i32,
}

struct SeedCategory {
    name: &'static str,
    pages: &'static [SeedPage],
}

const SEED: &[SeedCategory] = &[
    SeedCategory {
        name: "Python",
        pages: &[
            SeedPage {
                title: "Official Python Tutorial",
                url: "http://docs.python.org/3/tutorial/",
                views: 75,
            },
            SeedPage {
                title: "How to Think like a Computer Scientist",
                url: "http://www.greenteapress.com/thinkpython/",
                views: 47,
            },
            SeedPage {
                title: "Learn Python in 10 Minutes",
                url: "http://www.korokithakis.net/tutorials/python/",
                views: 48,
            },
        ],
    },
    SeedCategory {
        name: "Django",
        pages: &[
            SeedPage {
                title: "Official Django Tutorial",
                url: "https://docs.djangoproject.com/en/2.1/intro/tutorial01/",
                views: 64,
            },
            SeedPage {
                title: "Django Rocks",
                url: "http://www.djangorocks.com/",
                views: 38,
            },
            SeedPage {
                title: "How to Tango with Django",
                url: "http://www.tangowithdjango.com/",
                views: 57,
            },
        ],
    },
    SeedCategory {
        name: "Other Frameworks",
        pages: &[
            SeedPage {
                title: "Bottle",
                url: "http://bottlepy.org/docs/dev/",
                views: 32,
            },
            SeedPage {
                title: "Flask",
                url: "http://flask.pocoo.org",
                views: 29,
            },
        ],
    },
];

/// Seed the sample categories and pages, returning every pair touched.
pub fn populate<R>(repo: &R) -> RepositoryResult<Vec<(Category, Page)>>
where
    R: CategoryWriter + PageWriter,
{
    let mut seeded = Vec::new();

    for seed in SEED {
        let category = repo.get_or_create_category(&CategoryName::new(seed.name)?)?;
        for page in seed.pages {
            let page = repo.get_or_create_page(
                category.id,
                &PageTitle::new(page.title)?,
                &PageUrl::new(page.url)?,
                ViewCount::new(page.views)?,
            )?;
            seeded.push((category.clone(), page));
        }
    }

    Ok(seeded)
}
