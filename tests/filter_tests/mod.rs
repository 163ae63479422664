mod loader_test;
mod object_title_filter_test;
