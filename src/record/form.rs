use maud::{Markup, html};
use time::Date;

use crate::{
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    record::RecordKind,
};

pub struct RecordFormDefaults {
    pub kind: RecordKind,
    pub date: Date,
}

pub fn record_form_fields(defaults: &RecordFormDefaults) -> Markup {
    let is_expense = matches!(defaults.kind, RecordKind::Expense);

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Record kind" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div class="flex items-center gap-3"
                {
                    input
                        name="kind"
                        id="record-kind-expense"
                        type="radio"
                        value="expense"
                        checked[is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="record-kind-expense"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Expense"
                    }
                }

                div class="flex items-center gap-3"
                {
                    input
                        name="kind"
                        id="record-kind-income"
                        type="radio"
                        value="income"
                        checked[!is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="record-kind-income"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Income"
                    }
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            // Free text rather than a number input so that locale-formatted
            // values such as "5.000.000" or "1.234,56" can be typed as-is.
            input
                name="amount"
                id="amount"
                type="text"
                inputmode="decimal"
                placeholder="1.234,56"
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            input
                name="category"
                id="category"
                type="text"
                placeholder="Groceries"
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div id="note-field"
        {
            label
                for="note"
                class=(FORM_LABEL_STYLE)
            {
                "Note (expenses only)"
            }

            input
                name="note"
                id="note"
                type="text"
                placeholder="Optional note"
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
