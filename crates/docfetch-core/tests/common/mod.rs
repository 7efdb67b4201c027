pub mod document_server;
