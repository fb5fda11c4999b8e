pub mod nb_archive;
