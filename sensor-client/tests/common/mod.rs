pub mod mock_api;
pub mod recording_view;
