//! Hypermedia link builders for response DTOs.
//!
//! Every resource carries a `self` link. Write links only appear when the viewer's
//! ability allows the action, so clients can render controls straight from `links`.

use crate::{
    model::api::LinkDto,
    server::{
        middleware::ability::{Ability, Action, Subject},
        model::{course::Course, purchase::Purchase},
    },
};

/// Accumulates links for a single resource.
struct LinkSet {
    links: Vec<LinkDto>,
}

impl LinkSet {
    fn new(self_href: String) -> Self {
        Self {
            links: vec![link("self", self_href, "GET")],
        }
    }

    fn push(mut self, rel: &str, href: String, method: &str) -> Self {
        self.links.push(link(rel, href, method));
        self
    }

    fn push_if(self, condition: bool, rel: &str, href: String, method: &str) -> Self {
        if condition {
            self.push(rel, href, method)
        } else {
            self
        }
    }

    fn build(self) -> Vec<LinkDto> {
        self.links
    }
}

fn link(rel: &str, href: String, method: &str) -> LinkDto {
    LinkDto {
        rel: rel.to_string(),
        href,
        method: method.to_string(),
    }
}

/// Links for a course.
///
/// - `update`, `delete`, `create_section` for viewers who may update the course
/// - `purchase` for signed-in viewers other than the instructor when the course is
///   published and priced
/// - `category` when the course is filed under a category
pub fn course_links(course: &Course, ability: &Ability) -> Vec<LinkDto> {
    let href = format!("/api/courses/{}", course.id);
    let can_update = ability.can(Action::Update, &course.subject());
    let can_purchase = match ability.user_id() {
        Some(user_id) => {
            user_id != course.instructor_id
                && course.is_published()
                && !course.is_free()
                && ability.can(Action::Create, &Subject::Purchase { buyer_id: user_id })
        }
        None => false,
    };

    let links = LinkSet::new(href.clone())
        .push_if(can_update, "update", href.clone(), "PUT")
        .push_if(can_update, "delete", href.clone(), "DELETE")
        .push_if(
            can_update,
            "create_section",
            format!("{}/sections", href),
            "POST",
        )
        .push_if(can_purchase, "purchase", format!("{}/purchase", href), "POST");

    match course.category_id {
        Some(category_id) => links
            .push("category", format!("/api/categories/{}", category_id), "GET")
            .build(),
        None => links.build(),
    }
}

/// Links for a category.
pub fn category_links(category_id: i32, ability: &Ability) -> Vec<LinkDto> {
    let href = format!("/api/categories/{}", category_id);
    let can_update = ability.can(Action::Update, &Subject::Category);

    LinkSet::new(href.clone())
        .push(
            "courses",
            format!("/api/courses?category_id={}", category_id),
            "GET",
        )
        .push_if(can_update, "update", href.clone(), "PUT")
        .push_if(can_update, "delete", href, "DELETE")
        .build()
}

/// Links for a section of `course`.
pub fn section_links(course: &Course, section_id: i32, ability: &Ability) -> Vec<LinkDto> {
    let href = format!("/api/courses/{}/sections/{}", course.id, section_id);
    let can_update = ability.can(Action::Update, &course.subject());

    LinkSet::new(href.clone())
        .push_if(can_update, "update", href.clone(), "PUT")
        .push_if(can_update, "delete", href.clone(), "DELETE")
        .push_if(
            can_update,
            "create_lesson",
            format!("{}/lessons", href),
            "POST",
        )
        .build()
}

/// Links for a lesson of `course`.
pub fn lesson_links(course: &Course, lesson_id: i32, ability: &Ability) -> Vec<LinkDto> {
    let href = format!("/api/courses/{}/lessons/{}", course.id, lesson_id);
    let can_update = ability.can(Action::Update, &course.subject());

    LinkSet::new(href.clone())
        .push_if(can_update, "update", href.clone(), "PUT")
        .push_if(can_update, "delete", href, "DELETE")
        .build()
}

/// Links for a purchase.
///
/// - `approve` points at the provider approval page while the purchase is pending
/// - `capture` is offered to the buyer while the purchase is pending with an order
pub fn purchase_links(purchase: &Purchase, ability: &Ability) -> Vec<LinkDto> {
    let href = format!("/api/purchases/{}", purchase.id);
    let is_buyer = ability.user_id() == Some(purchase.user_id);

    let links = LinkSet::new(href.clone()).push(
        "course",
        format!("/api/courses/{}", purchase.course_id),
        "GET",
    );

    let links = match (&purchase.approval_url, purchase.is_pending()) {
        (Some(approval_url), true) => links.push("approve", approval_url.clone(), "GET"),
        _ => links,
    };

    links
        .push_if(
            is_buyer && purchase.is_pending() && purchase.provider_order_id.is_some(),
            "capture",
            format!("{}/capture", href),
            "POST",
        )
        .build()
}
