//! Table output for the console

use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

use crate::slack::Member;

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Build the console table for a member list
pub fn members_table(members: &[Member]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "ID",
            "Name",
            "Real Name",
            "Email",
            "Bot",
            "Admin",
            "Deleted",
        ]);

    for member in members {
        table.add_row(vec![
            member.id(),
            member.name(),
            member.real_name(),
            member.email(),
            yes_no(member.is_bot()),
            yes_no(member.is_admin()),
            yes_no(member.deleted()),
        ]);
    }

    table
}
