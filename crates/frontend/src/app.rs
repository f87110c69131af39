use crate::lms::a001_course::ui::list::CourseList;
use crate::lms::a002_user::ui::list::UserList;
use leptos::prelude::*;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Courses,
    Users,
}

#[component]
pub fn App() -> impl IntoView {
    let page = RwSignal::new(Page::Courses);

    view! {
        <div class="app">
            <Flex gap=FlexGap::Small class="app__nav">
                <Button
                    appearance=move || {
                        if page.get() == Page::Courses {
                            ButtonAppearance::Primary
                        } else {
                            ButtonAppearance::Subtle
                        }
                    }
                    on_click=move |_| page.set(Page::Courses)
                >
                    "Курсы"
                </Button>
                <Button
                    appearance=move || {
                        if page.get() == Page::Users {
                            ButtonAppearance::Primary
                        } else {
                            ButtonAppearance::Subtle
                        }
                    }
                    on_click=move |_| page.set(Page::Users)
                >
                    "Пользователи"
                </Button>
            </Flex>
            {move || match page.get() {
                Page::Courses => view! { <CourseList /> }.into_any(),
                Page::Users => view! { <UserList /> }.into_any(),
            }}
        </div>
    }
}
