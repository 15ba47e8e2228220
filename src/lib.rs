pub mod config;

pub mod core {
    pub mod catalog;
    pub mod context;
    pub mod html_parser;
    pub mod moodle;
    pub mod page;
    pub mod render;
}

pub mod error {
    pub mod catalog;
}

pub mod http {
    pub mod moodle_exception_middleware;
    pub mod token_middleware;
}

pub mod model {
    pub mod category;
    pub mod course;
    pub mod moodle_exception;
    pub mod sorted_courses;
}

pub mod utils {
    pub mod input;
    pub mod notification;
}
