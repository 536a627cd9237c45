uucore::bin!(uu_monitor);
