mod course;
mod lesson;
mod payment_event;
mod purchase;
mod section;
