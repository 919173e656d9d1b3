mod auth_test;
mod booking_test;
mod contact_test;
mod middleware_test;
mod time_slot_test;
