pub mod match_server;
