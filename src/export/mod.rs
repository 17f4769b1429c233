mod csv_writer;

pub use csv_writer::write_csv;
