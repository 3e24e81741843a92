mod availability_test;
mod booking_request_test;
mod health_test;
mod middleware_test;
mod test_utils;
