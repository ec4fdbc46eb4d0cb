//! Category display formatting
//!
//! Categories render as a tree (category, then its subcategories) or as a
//! detail block.

use crate::models::Category;

/// Format categories as a tree
pub fn format_category_tree(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nAdd one with 'category add <NAME>'.".to_string();
    }

    let mut output = String::new();

    for category in categories {
        let description = if category.description.is_empty() {
            String::new()
        } else {
            format!(" - {}", category.description)
        };
        output.push_str(&format!("{} {}{}\n", category.id, category.name, description));

        for (j, sub) in category.subcategories.iter().enumerate() {
            let is_last = j == category.subcategories.len() - 1;
            let prefix = if is_last { "└── " } else { "├── " };
            output.push_str(&format!("  {}{}\n", prefix, sub.name));
        }
    }

    output
}

/// Format a single category's details
pub fn format_category_details(category: &Category, transaction_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:            {}\n", category.id));
    if !category.description.is_empty() {
        output.push_str(&format!("  Description:   {}\n", category.description));
    }
    output.push_str(&format!("  Transactions:  {}\n", transaction_count));

    if category.subcategories.is_empty() {
        output.push_str("  Subcategories: (none)\n");
    } else {
        output.push_str("  Subcategories:\n");
        for sub in &category.subcategories {
            let description = if sub.description.is_empty() {
                String::new()
            } else {
                format!(" - {}", sub.description)
            };
            output.push_str(&format!("    {} {}{}\n", sub.id, sub.name, description));
        }
    }

    output
}
