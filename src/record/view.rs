//! HTML rendering for the records page.

use maud::{Markup, PreEscaped, html};
use time::Date;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, EXPENSE_BADGE_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, HeadElement, INCOME_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    record::{
        Record, RecordKind,
        filter::{RecordFilter, Totals},
        form::{RecordFormDefaults, record_form_fields},
    },
};

/// The max number of graphemes to display in the record table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// The month selector labels; index 0 is the "match everything" choice.
const MONTH_NAMES: [&str; 13] = [
    "All months",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Hides the note field while the income radio is selected, since only
/// expense records carry notes.
const NOTE_TOGGLE_SCRIPT: &str = "\
    document.addEventListener('DOMContentLoaded', () => {\
        const noteField = document.getElementById('note-field');\
        const kindInputs = document.querySelectorAll(\"input[name='kind']\");\
        const toggleNote = () => {\
            const checked = document.querySelector(\"input[name='kind']:checked\");\
            const isExpense = checked && checked.value === 'expense';\
            noteField.style.display = isExpense ? '' : 'none';\
            if (!isExpense) { document.getElementById('note').value = ''; }\
        };\
        kindInputs.forEach((input) => input.addEventListener('change', toggleNote));\
        toggleNote();\
    });";

/// Renders a record as a table row.
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct RecordTableRow {
    /// When the transaction happened.
    pub(crate) date: Date,
    /// A text description of what the transaction was for.
    pub(crate) description: String,
    /// The category the transaction belongs to.
    pub(crate) category: String,
    /// Whether the record is income or an expense.
    pub(crate) kind: RecordKind,
    /// The amount of money earned or spent.
    pub(crate) amount: f64,
    /// The note attached to an expense record.
    pub(crate) note: Option<String>,
    /// The API path to delete this record.
    pub(crate) delete_url: String,
}

impl RecordTableRow {
    pub(crate) fn new_from_record(record: Record) -> Self {
        let delete_url =
            endpoints::format_endpoint(endpoints::DELETE_RECORD, &record.id.to_string());

        Self {
            date: record.date,
            description: record.description,
            category: record.category,
            kind: record.kind,
            amount: record.amount,
            note: record.note,
            delete_url,
        }
    }
}

pub(crate) fn records_view(
    rows: Vec<RecordTableRow>,
    totals: Totals,
    filter: &RecordFilter,
    years: &[i32],
    today: Date,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::RECORDS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-6"
            {
                (summary_cards(totals))
                (filter_form(filter, years))
                (record_form(filter, today))
                (records_table(&rows))
                (store_controls())
            }
        }
    };

    base(
        "Records",
        &[HeadElement::ScriptSource(PreEscaped(
            NOTE_TOGGLE_SCRIPT.to_owned(),
        ))],
        &content,
    )
}

fn summary_cards(totals: Totals) -> Markup {
    let card_style = "p-4 rounded border border-gray-200 bg-white \
        dark:bg-gray-800 dark:border-gray-700";
    let label_style = "text-sm text-gray-500 dark:text-gray-400";

    html! {
        section class="grid grid-cols-1 sm:grid-cols-3 gap-4"
        {
            div class=(card_style)
            {
                p class=(label_style) { "Income" }
                p
                    class="text-xl font-semibold text-green-700 dark:text-green-300"
                    data-summary="income"
                {
                    (format_currency(totals.income))
                }
            }

            div class=(card_style)
            {
                p class=(label_style) { "Expenses" }
                p
                    class="text-xl font-semibold text-red-700 dark:text-red-300"
                    data-summary="expenses"
                {
                    (format_currency(totals.expenses))
                }
            }

            div class=(card_style)
            {
                p class=(label_style) { "Balance" }
                p class="text-xl font-semibold" data-summary="balance"
                {
                    (format_currency(totals.balance))
                }
            }
        }
    }
}

fn filter_form(filter: &RecordFilter, years: &[i32]) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::RECORDS_VIEW)
            class="flex flex-wrap items-end gap-4"
        {
            div
            {
                label for="filter-month" class=(FORM_LABEL_STYLE) { "Month" }

                select name="month" id="filter-month" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (value, name) in MONTH_NAMES.iter().enumerate() {
                        @if value == usize::from(filter.month) {
                            option value=(value) selected { (name) }
                        } @else {
                            option value=(value) { (name) }
                        }
                    }
                }
            }

            div
            {
                label for="filter-year" class=(FORM_LABEL_STYLE) { "Year" }

                select name="year" id="filter-year" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @if filter.year.is_none() {
                        option value="" selected { "All years" }
                    } @else {
                        option value="" { "All years" }
                    }

                    @for year in years {
                        @if Some(*year) == filter.year {
                            option value=(year) selected { (year) }
                        } @else {
                            option value=(year) { (year) }
                        }
                    }
                }
            }

            button type="submit" class="px-4 py-2 bg-blue-500 dark:bg-blue-600 \
                hover:bg-blue-600 hover:dark:bg-blue-700 text-white rounded"
            {
                "Apply"
            }
        }
    }
}

fn record_form(filter: &RecordFilter, today: Date) -> Markup {
    let fields = record_form_fields(&RecordFormDefaults {
        kind: RecordKind::Expense,
        date: today,
    });

    html! {
        section
        {
            h2 class="text-lg font-semibold mb-2" { "New record" }

            form
                hx-post=(endpoints::RECORDS_API)
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                (fields)

                // Preserved so the redirect after a successful create lands
                // back on the same filtered view.
                input type="hidden" name="month" value=(filter.month);
                input type="hidden" name="year" value=[filter.year];

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add record" }
            }
        }
    }
}

fn records_table(rows: &[RecordTableRow]) -> Markup {
    html! {
        div class="w-full overflow-x-auto"
        {
            table class="w-full my-2 text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Note" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Kind" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @if rows.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="7" class=(TABLE_CELL_STYLE) data-empty-state="true"
                            {
                                "No records for this period. Add one above to get started."
                            }
                        }
                    }

                    @for row in rows {
                        (record_table_row(row))
                    }
                }
            }
        }
    }
}

fn record_table_row(row: &RecordTableRow) -> Markup {
    let badge_style = match row.kind {
        RecordKind::Income => INCOME_BADGE_STYLE,
        RecordKind::Expense => EXPENSE_BADGE_STYLE,
    };
    let amount_style = match row.kind {
        RecordKind::Income => "text-green-700 dark:text-green-300",
        RecordKind::Expense => "text-red-700 dark:text-red-300",
    };

    html! {
        tr class=(TABLE_ROW_STYLE) data-record-row="true"
        {
            td class=(TABLE_CELL_STYLE) { (row.date) }
            td class=(TABLE_CELL_STYLE) { (truncate_description(&row.description)) }
            td class=(TABLE_CELL_STYLE) { (row.category) }
            td class=(TABLE_CELL_STYLE)
            {
                @match &row.note {
                    Some(note) => { (note) }
                    None => { "-" }
                }
            }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(badge_style) { (row.kind.label()) }
            }
            td class={ (TABLE_CELL_STYLE) " " (amount_style) }
            {
                (format_currency(row.amount))
            }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    hx-delete=(row.delete_url)
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-confirm="Delete this record?"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

fn store_controls() -> Markup {
    html! {
        section class="flex flex-wrap items-center gap-6"
        {
            a href=(endpoints::EXPORT) download class=(LINK_STYLE) { "Export JSON" }

            a href=(endpoints::IMPORT_VIEW) class=(LINK_STYLE) { "Import" }

            button
                hx-post=(endpoints::CLEAR_RECORDS)
                hx-confirm="Delete all records? This cannot be undone."
                class=(BUTTON_DELETE_STYLE)
            {
                "Clear all"
            }
        }
    }
}

/// Truncate `description` to [MAX_DESCRIPTION_GRAPHEMES] graphemes, appending
/// an ellipsis when anything was cut off.
fn truncate_description(description: &str) -> String {
    let graphemes: Vec<&str> = description.graphemes(true).collect();

    if graphemes.len() <= MAX_DESCRIPTION_GRAPHEMES {
        return description.to_owned();
    }

    let mut truncated: String = graphemes[..MAX_DESCRIPTION_GRAPHEMES].concat();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod truncate_description_tests {
    use super::{MAX_DESCRIPTION_GRAPHEMES, truncate_description};

    #[test]
    fn short_descriptions_are_untouched() {
        assert_eq!(truncate_description("Salary"), "Salary");
    }

    #[test]
    fn long_descriptions_are_truncated_with_ellipsis() {
        let long = "a".repeat(MAX_DESCRIPTION_GRAPHEMES + 10);

        let truncated = truncate_description(&long);

        assert_eq!(
            truncated,
            format!("{}…", "a".repeat(MAX_DESCRIPTION_GRAPHEMES))
        );
    }
}
