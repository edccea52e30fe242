use anyhow::Result;

use crate::catalog::{same_category, Catalog};

pub fn list_pages(category: Option<&str>) -> Result<()> {
    let catalog = Catalog::builtin()?;

    println!("{:<18} {:<44} TITLE", "CATEGORY", "URL");
    let mut shown = 0;
    for page in catalog.iter().filter(|p| matches_category(&p.category, category)) {
        println!("{:<18} {:<44} {}", page.category, page.url, page.title);
        shown += 1;
    }

    if shown == 0 {
        if let Some(c) = category {
            println!("(no pages in category '{}')", c);
        }
    }

    Ok(())
}

pub fn list_categories() -> Result<()> {
    let catalog = Catalog::builtin()?;

    println!("{:<18} PAGES", "CATEGORY");
    for c in catalog.categories() {
        println!("{:<18} {}", c.name, c.pages);
    }

    Ok(())
}

fn matches_category(page_category: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |f| same_category(page_category, f))
}
