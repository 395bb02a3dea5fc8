//! The shared navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// The top navigation bar, highlighting the current page.
pub struct NavBar<'a> {
    current_route: &'a str,
}

impl<'a> NavBar<'a> {
    /// Create a nav bar for the page at `current_route`.
    pub fn new(current_route: &'a str) -> Self {
        Self { current_route }
    }

    /// Render the nav bar.
    pub fn into_html(self) -> Markup {
        let items = [
            ("Tags", endpoints::TAGS_VIEW),
            ("New Tag", endpoints::NEW_TAG_VIEW),
        ];

        html! {
            nav class="bg-white border-gray-200 dark:bg-gray-800 shadow-sm"
            {
                div class="max-w-screen-xl flex flex-wrap items-center gap-6 mx-auto p-4"
                {
                    span class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "Taggery"
                    }

                    @for (label, route) in items {
                        @if route == self.current_route {
                            span class="text-blue-600 dark:text-blue-500 font-medium" { (label) }
                        } @else {
                            a
                                href=(route)
                                class="text-gray-900 dark:text-white hover:text-blue-600 dark:hover:text-blue-500"
                            {
                                (label)
                            }
                        }
                    }
                }
            }
        }
    }
}
